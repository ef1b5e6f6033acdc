//! News use-cases.
//!
//! # Responsibility
//! - List, add and update news rows.
//! - Delete a news item together with every comment that references it.
//!
//! # Invariants
//! - `delete_news` removes the comments and the news row atomically.

use super::comment_manager::CommentManager;
use super::{rebuild_all, update_record};
use crate::db::schema::NEWS_TABLE;
use crate::db::{DbClient, Record};
use crate::model::content::{columns, ContentEntity, Timestamp};
use crate::model::news::News;
use crate::repo::{in_transaction, RepoResult, Repository};
use log::{debug, error, info};
use std::time::Instant;

/// Column set written when a news item is first stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsInsert {
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl NewsInsert {
    pub fn into_record(self) -> Record {
        Record::new()
            .with(columns::TITLE, self.title)
            .with(columns::BODY, self.body)
            .with(columns::CREATED_AT, self.created_at)
    }
}

impl From<&News> for NewsInsert {
    fn from(news: &News) -> Self {
        Self {
            title: news.title().to_string(),
            body: news.body().to_string(),
            created_at: news.created_at(),
        }
    }
}

/// Manager for the `news` table.
pub struct NewsManager<'db, C: DbClient + ?Sized> {
    repo: Repository<'db, C>,
}

impl<'db, C: DbClient + ?Sized> NewsManager<'db, C> {
    pub fn try_new(db: &'db C) -> RepoResult<Self> {
        Ok(Self {
            repo: Repository::new(db, NEWS_TABLE)?,
        })
    }

    /// Lists every news item in table order.
    pub fn list_news(&self) -> RepoResult<Vec<News>> {
        let rows = self.repo.list()?;
        let news = rebuild_all(&rows)?;
        debug!("event=news_list module=manager status=ok count={}", rows.len());
        Ok(news)
    }

    /// Stores a new news item and returns its generated id.
    pub fn add_news(&self, news: &News) -> RepoResult<String> {
        let id = self.repo.save(&NewsInsert::from(news).into_record())?;
        info!("event=news_add module=manager status=ok id={id}");
        Ok(id)
    }

    /// Rewrites every column of a saved news item and stamps `updatedAt`
    /// with the current time.
    pub fn update_news(&self, news: &News) -> RepoResult<String> {
        let record = update_record(news)?;
        let id = self.repo.save(&record)?;
        info!("event=news_update module=manager status=ok id={id}");
        Ok(id)
    }

    /// Deletes `id` and all of its comments.
    ///
    /// Returns the number of news rows removed (0 when `id` did not exist;
    /// its comments are removed regardless).
    ///
    /// # Errors
    /// - Any listing or delete failure rolls the whole operation back.
    pub fn delete_news(&self, id: &str) -> RepoResult<usize> {
        let started_at = Instant::now();
        let db = self.repo.db();
        let comments = CommentManager::try_new(db)?;

        let outcome = in_transaction(db, || {
            let mut removed_comments = 0;
            for comment in comments.list_comments()?.iter().filter(|c| c.belongs_to(id)) {
                removed_comments += comments.delete_comment(comment.id())?;
            }
            let removed_news = self.repo.delete(id)?;
            Ok((removed_news, removed_comments))
        });

        match outcome {
            Ok((removed_news, removed_comments)) => {
                info!(
                    "event=news_delete module=manager status=ok id={} news_rows={} comment_rows={} duration_ms={}",
                    id,
                    removed_news,
                    removed_comments,
                    started_at.elapsed().as_millis()
                );
                Ok(removed_news)
            }
            Err(err) => {
                error!(
                    "event=news_delete module=manager status=error id={} duration_ms={} error={}",
                    id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
