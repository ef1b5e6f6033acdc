//! Content store core: news and comments over a relational table each.
//! This crate owns entity reconstruction, statement building and the
//! cascading delete.

pub mod config;
pub mod db;
pub mod logging;
pub mod manager;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use db::{open_db, open_db_in_memory, DbClient, DbError, DbResult, Record};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use manager::{CommentInsert, CommentManager, NewsInsert, NewsManager};
pub use model::comment::Comment;
pub use model::content::{ContentEntity, ContentValidationError, Timestamp};
pub use model::news::News;
pub use repo::{in_transaction, RepoError, RepoResult, Repository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
