//! Generic table repository over a `DbClient`.
//!
//! # Responsibility
//! - Provide list/save/delete over one table for every content manager.
//! - Map driver and reconstruction failures into one `RepoError`.
//!
//! # Invariants
//! - Values are always bound parameters; only validated identifiers are
//!   interpolated (see `statement`).
//! - `list` applies no filter, ordering or pagination.

pub mod statement;

use crate::db::{DbClient, DbError, Record};
use crate::model::content::ContentValidationError;
use log::{debug, warn};
use rusqlite::types::Value;
use self::statement::Ident;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for content persistence and reconstruction.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContentValidationError),
    Db(DbError),
    /// Table or column name is not a bare SQL identifier.
    InvalidIdentifier(String),
    /// `save` was handed a record with no columns.
    EmptyRecord,
    /// An update was requested for an entity that was never saved.
    MissingId,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid sql identifier `{name}`"),
            Self::EmptyRecord => write!(f, "cannot save a record without columns"),
            Self::MissingId => write!(f, "cannot update an entity without an id"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidIdentifier(_) | Self::EmptyRecord | Self::MissingId => None,
        }
    }
}

impl From<ContentValidationError> for RepoError {
    fn from(value: ContentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// List/save/delete over a single table.
pub struct Repository<'db, C: DbClient + ?Sized> {
    db: &'db C,
    table: Ident,
}

impl<'db, C: DbClient + ?Sized> Repository<'db, C> {
    /// Binds a repository to `table`.
    ///
    /// `table` comes from code, never from user input; it is still checked.
    pub fn new(db: &'db C, table: &str) -> RepoResult<Self> {
        Ok(Self {
            db,
            table: Ident::new(table)?,
        })
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub fn db(&self) -> &'db C {
        self.db
    }

    /// Returns every row of the table.
    pub fn list(&self) -> RepoResult<Vec<Record>> {
        let stmt = statement::select_all(&self.table);
        Ok(self.db.select(&stmt.sql, &stmt.params)?)
    }

    /// Returns rows whose `column` equals `value`.
    pub fn list_where(&self, column: &str, value: Value) -> RepoResult<Vec<Record>> {
        let column = Ident::new(column)?;
        let stmt = statement::select_where(&self.table, &column, value);
        Ok(self.db.select(&stmt.sql, &stmt.params)?)
    }

    /// Inserts or updates one row and returns its id.
    ///
    /// # Contract
    /// - An `id` column that is not `NULL` selects UPDATE, even when it is an
    ///   empty string; the given id is returned even when no row matched.
    /// - A missing or `NULL` `id` selects INSERT; the id reported by the
    ///   client is returned.
    pub fn save(&self, data: &Record) -> RepoResult<String> {
        match data.id() {
            Some(id) => {
                let id_value = data
                    .get("id")
                    .cloned()
                    .unwrap_or_else(|| Value::Text(id.clone()));
                let stmt = statement::update(&self.table, data, id_value)?;
                let changed = self.db.execute(&stmt.sql, &stmt.params)?;
                debug!(
                    "event=repo_save module=repo status=ok mode=update table={} changed={}",
                    self.table.as_str(),
                    changed
                );
                Ok(id)
            }
            None => {
                let stmt = statement::insert(&self.table, data)?;
                self.db.execute(&stmt.sql, &stmt.params)?;
                let id = self.db.last_insert_id()?;
                debug!(
                    "event=repo_save module=repo status=ok mode=insert table={} id={}",
                    self.table.as_str(),
                    id
                );
                Ok(id)
            }
        }
    }

    /// Deletes the row with `id` and returns the affected row count.
    pub fn delete(&self, id: &str) -> RepoResult<usize> {
        let stmt = statement::delete_by_id(&self.table, id);
        Ok(self.db.execute(&stmt.sql, &stmt.params)?)
    }
}

/// Runs `work` inside one transaction on `db`.
///
/// Commits when `work` succeeds. On any failure the transaction is rolled
/// back and the original error is returned.
pub fn in_transaction<C, T, F>(db: &C, work: F) -> RepoResult<T>
where
    C: DbClient + ?Sized,
    F: FnOnce() -> RepoResult<T>,
{
    db.begin()?;

    let outcome = work().and_then(|value| {
        db.commit()?;
        Ok(value)
    });

    if let Err(err) = &outcome {
        if let Err(rollback_err) = db.rollback() {
            warn!(
                "event=tx_rollback module=repo status=error cause={} error={}",
                err, rollback_err
            );
        }
    }

    outcome
}
