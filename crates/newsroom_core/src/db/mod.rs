//! SQLite storage bootstrap and the database client contract.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the content store.
//! - Define the `DbClient` contract repositories run statements through.
//!
//! # Invariants
//! - Values always travel as bound parameters, never as statement text.
//! - Core code must not read/write content before the schema bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;
mod open;
mod record;
pub mod schema;

pub use client::DbClient;
pub use open::{open_db, open_db_in_memory};
pub use record::Record;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
