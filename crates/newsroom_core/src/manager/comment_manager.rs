//! Comment use-cases.

use super::{rebuild_all, update_record};
use crate::db::schema::COMMENT_TABLE;
use crate::db::{DbClient, Record};
use crate::model::comment::Comment;
use crate::model::content::{columns, ContentEntity, Timestamp};
use crate::repo::{RepoResult, Repository};
use log::{debug, info};
use rusqlite::types::Value;

/// Column set written when a comment is first stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInsert {
    pub body: String,
    pub created_at: Timestamp,
    pub news_id: String,
}

impl CommentInsert {
    pub fn into_record(self) -> Record {
        Record::new()
            .with(columns::BODY, self.body)
            .with(columns::CREATED_AT, self.created_at)
            .with(columns::NEWS_ID, self.news_id)
    }
}

impl From<&Comment> for CommentInsert {
    fn from(comment: &Comment) -> Self {
        Self {
            body: comment.body().to_string(),
            created_at: comment.created_at(),
            news_id: comment.news_id().to_string(),
        }
    }
}

/// Manager for the `comment` table.
pub struct CommentManager<'db, C: DbClient + ?Sized> {
    repo: Repository<'db, C>,
}

impl<'db, C: DbClient + ?Sized> CommentManager<'db, C> {
    pub fn try_new(db: &'db C) -> RepoResult<Self> {
        Ok(Self {
            repo: Repository::new(db, COMMENT_TABLE)?,
        })
    }

    /// Lists every comment in table order.
    pub fn list_comments(&self) -> RepoResult<Vec<Comment>> {
        let rows = self.repo.list()?;
        let comments = rebuild_all(&rows)?;
        debug!(
            "event=comment_list module=manager status=ok count={}",
            rows.len()
        );
        Ok(comments)
    }

    /// Lists the comments attached to one news item.
    pub fn list_comments_for_news(&self, news_id: &str) -> RepoResult<Vec<Comment>> {
        let rows = self
            .repo
            .list_where(columns::NEWS_ID, Value::Text(news_id.to_string()))?;
        rebuild_all(&rows)
    }

    /// Stores a new comment and returns its generated id.
    pub fn add_comment_for_news(&self, comment: &Comment) -> RepoResult<String> {
        let id = self.repo.save(&CommentInsert::from(comment).into_record())?;
        info!(
            "event=comment_add module=manager status=ok id={} news_id={}",
            id,
            comment.news_id()
        );
        Ok(id)
    }

    /// Rewrites every column of a saved comment and stamps `updatedAt`.
    pub fn update_comment(&self, comment: &Comment) -> RepoResult<String> {
        let record = update_record(comment)?;
        let id = self.repo.save(&record)?;
        info!("event=comment_update module=manager status=ok id={id}");
        Ok(id)
    }

    /// Deletes one comment and returns the affected row count.
    pub fn delete_comment(&self, id: &str) -> RepoResult<usize> {
        let removed = self.repo.delete(id)?;
        info!("event=comment_delete module=manager status=ok id={id} rows={removed}");
        Ok(removed)
    }
}
