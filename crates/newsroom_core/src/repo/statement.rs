//! SQL statement builder for the generic repository.
//!
//! # Responsibility
//! - Build SELECT/INSERT/UPDATE/DELETE text from trusted table and column names.
//! - Keep every value out of the statement text as a bound `?` parameter.
//!
//! # Invariants
//! - Identifiers reach SQL text only through `Ident`, which rejects anything
//!   outside `[A-Za-z_][A-Za-z0-9_]*` and back-tick quotes the rest.
//! - Parameter order always equals placeholder order.

use super::{RepoError, RepoResult};
use crate::db::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;
use std::fmt::{Display, Formatter};

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// A table or column name that is safe to interpolate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    /// Validates `name` as a bare SQL identifier.
    pub fn new(name: &str) -> RepoResult<Self> {
        if IDENT_RE.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(RepoError::InvalidIdentifier(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.0)
    }
}

/// Statement text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

pub fn select_all(table: &Ident) -> Statement {
    Statement {
        sql: format!("SELECT * FROM {table}"),
        params: Vec::new(),
    }
}

pub fn select_where(table: &Ident, column: &Ident, value: Value) -> Statement {
    Statement {
        sql: format!("SELECT * FROM {table} WHERE {column} = ?"),
        params: vec![value],
    }
}

/// `INSERT INTO t (c1, c2) VALUES (?, ?)` with the record values in order.
pub fn insert(table: &Ident, record: &Record) -> RepoResult<Statement> {
    let columns = record_columns(record)?;
    let column_list = columns
        .iter()
        .map(Ident::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    Ok(Statement {
        sql: format!("INSERT INTO {table} ({column_list}) VALUES ({placeholders})"),
        params: record.columns().map(|(_, value)| value.clone()).collect(),
    })
}

/// `UPDATE t SET c1 = ?, c2 = ? WHERE id = ?`.
///
/// Every record column is assigned, `id` included; `id` is then bound once
/// more for the WHERE clause.
pub fn update(table: &Ident, record: &Record, id: Value) -> RepoResult<Statement> {
    let columns = record_columns(record)?;
    let assignments = columns
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut params: Vec<Value> = record.columns().map(|(_, value)| value.clone()).collect();
    params.push(id);

    Ok(Statement {
        sql: format!("UPDATE {table} SET {assignments} WHERE `id` = ?"),
        params,
    })
}

pub fn delete_by_id(table: &Ident, id: &str) -> Statement {
    Statement {
        sql: format!("DELETE FROM {table} WHERE `id` = ?"),
        params: vec![Value::Text(id.to_string())],
    }
}

fn record_columns(record: &Record) -> RepoResult<Vec<Ident>> {
    if record.is_empty() {
        return Err(RepoError::EmptyRecord);
    }
    record.columns().map(|(name, _)| Ident::new(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::{delete_by_id, insert, select_all, select_where, update, Ident};
    use crate::db::Record;
    use crate::repo::RepoError;
    use rusqlite::types::Value;

    fn table() -> Ident {
        Ident::new("news").unwrap()
    }

    #[test]
    fn ident_rejects_injection_attempts() {
        for bad in ["", "1news", "news; DROP TABLE news", "ne`ws", "news id"] {
            let err = Ident::new(bad).unwrap_err();
            assert!(matches!(err, RepoError::InvalidIdentifier(name) if name == bad));
        }
        assert_eq!(Ident::new("createdAt").unwrap().as_str(), "createdAt");
    }

    #[test]
    fn select_statements_quote_identifiers() {
        assert_eq!(select_all(&table()).sql, "SELECT * FROM `news`");

        let column = Ident::new("newsId").unwrap();
        let stmt = select_where(&table(), &column, Value::Text("1".to_string()));
        assert_eq!(stmt.sql, "SELECT * FROM `news` WHERE `newsId` = ?");
        assert_eq!(stmt.params, vec![Value::Text("1".to_string())]);
    }

    #[test]
    fn insert_lists_columns_in_record_order() {
        let record = Record::new()
            .with("title", "Hello".to_string())
            .with("body", "World".to_string());
        let stmt = insert(&table(), &record).unwrap();

        assert_eq!(
            stmt.sql,
            "INSERT INTO `news` (`title`, `body`) VALUES (?, ?)"
        );
        assert_eq!(
            stmt.params,
            vec![
                Value::Text("Hello".to_string()),
                Value::Text("World".to_string())
            ]
        );
    }

    #[test]
    fn update_binds_id_after_assignments() {
        let record = Record::new()
            .with("id", "5".to_string())
            .with("title", "Edited".to_string());
        let stmt = update(&table(), &record, Value::Text("5".to_string())).unwrap();

        assert_eq!(
            stmt.sql,
            "UPDATE `news` SET `id` = ?, `title` = ? WHERE `id` = ?"
        );
        assert_eq!(stmt.params.len(), 3);
        assert_eq!(stmt.params[2], Value::Text("5".to_string()));
    }

    #[test]
    fn empty_record_and_bad_columns_are_rejected() {
        assert!(matches!(
            insert(&table(), &Record::new()),
            Err(RepoError::EmptyRecord)
        ));

        let record = Record::new().with("body = body; --", "x".to_string());
        assert!(matches!(
            insert(&table(), &record),
            Err(RepoError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn delete_binds_exactly_one_parameter() {
        let stmt = delete_by_id(&table(), "9");
        assert_eq!(stmt.sql, "DELETE FROM `news` WHERE `id` = ?");
        assert_eq!(stmt.params, vec![Value::Text("9".to_string())]);
    }
}
