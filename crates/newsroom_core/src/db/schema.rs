//! Content schema bootstrap.
//!
//! Tables are created with `IF NOT EXISTS`; there is no version tracking.

use super::DbResult;
use rusqlite::Connection;

/// Table holding news rows.
pub const NEWS_TABLE: &str = "news";
/// Table holding comment rows.
pub const COMMENT_TABLE: &str = "comment";

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the content tables when they are missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
