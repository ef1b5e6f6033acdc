//! Content managers: per-entity use-cases over the generic repository.
//!
//! # Responsibility
//! - Rebuild `News`/`Comment` entities from listed rows.
//! - Translate entities into typed insert requests and update records.
//! - Own cross-entity operations such as the cascading news delete.
//!
//! # Invariants
//! - A single malformed row fails the whole listing; no partial results.
//! - Cascading delete runs in one transaction.

pub mod comment_manager;
pub mod news_manager;

use crate::db::Record;
use crate::model::content::{columns, ContentEntity, Timestamp};
use crate::repo::{RepoError, RepoResult};

pub use comment_manager::{CommentInsert, CommentManager};
pub use news_manager::{NewsInsert, NewsManager};

fn rebuild_all<E: ContentEntity>(rows: &[Record]) -> RepoResult<Vec<E>> {
    rows.iter()
        .map(E::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepoError::from)
}

/// Full row for an update, with `updatedAt` stamped now.
fn update_record<E: ContentEntity>(entity: &E) -> RepoResult<Record> {
    if entity.id().is_empty() {
        return Err(RepoError::MissingId);
    }

    let updated_at = Timestamp::now();
    Ok(entity
        .to_record()
        .columns()
        .map(|(name, value)| {
            let value = if name == columns::UPDATED_AT {
                updated_at.into()
            } else {
                value.clone()
            };
            (name.to_string(), value)
        })
        .collect())
}
