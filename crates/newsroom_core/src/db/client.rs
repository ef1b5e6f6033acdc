//! Database client contract and its SQLite implementation.
//!
//! # Responsibility
//! - Run parameterized statements and queries for the repository layer.
//! - Expose transaction demarcation for multi-statement use-cases.
//!
//! # Invariants
//! - `select` returns rows in the order SQLite yields them.
//! - `last_insert_id` reflects the most recent insert on this connection.

use super::{DbResult, Record};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Connection-level primitives consumed by repositories.
pub trait DbClient {
    /// Runs a mutating statement and returns the affected row count.
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize>;
    /// Runs a read-only query and returns every matching row.
    fn select(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Record>>;
    /// Returns the identifier generated by the most recent insert.
    fn last_insert_id(&self) -> DbResult<String>;
    fn begin(&self) -> DbResult<()>;
    fn commit(&self) -> DbResult<()>;
    fn rollback(&self) -> DbResult<()>;
}

impl DbClient for Connection {
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        debug!(
            "event=db_execute module=db status=start params={}",
            params.len()
        );
        let changed = Connection::execute(self, sql, params_from_iter(params.iter()))?;
        Ok(changed)
    }

    fn select(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Record>> {
        let mut stmt = self.prepare(sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (index, name) in names.iter().enumerate() {
                record.push(name.as_str(), row.get::<_, Value>(index)?);
            }
            out.push(record);
        }

        debug!(
            "event=db_select module=db status=ok rows={}",
            out.len()
        );
        Ok(out)
    }

    fn last_insert_id(&self) -> DbResult<String> {
        Ok(self.last_insert_rowid().to_string())
    }

    fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN IMMEDIATE;")?;
        Ok(())
    }

    fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT;")?;
        Ok(())
    }

    fn rollback(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK;")?;
        Ok(())
    }
}
