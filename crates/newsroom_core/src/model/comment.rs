//! Comment content entity.
//!
//! `news_id` is a weak reference: nothing checks that the news row exists.

use super::content::{
    columns, id_value, optional_timestamp, optional_timestamp_value, parse_timestamp,
    required_text, write_json, ContentEntity, ContentValidationError, Timestamp,
};
use crate::db::Record;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One row of the `comment` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: String,
    news_id: String,
    body: String,
    created_at: Timestamp,
    updated_at: Option<Timestamp>,
    deleted_at: Option<Timestamp>,
}

impl Comment {
    /// Creates an unsaved comment attached to `news_id`.
    pub fn new(news_id: impl Into<String>, body: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id: String::new(),
            news_id: news_id.into(),
            body: body.into(),
            created_at,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn news_id(&self) -> &str {
        &self.news_id
    }

    /// Returns whether this comment points at the given news id.
    pub fn belongs_to(&self, news_id: &str) -> bool {
        self.news_id == news_id
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = id.into();
        self
    }

    pub fn set_news_id(&mut self, news_id: impl Into<String>) -> &mut Self {
        self.news_id = news_id.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn set_created_at(&mut self, created_at: Timestamp) -> &mut Self {
        self.created_at = created_at;
        self
    }

    pub fn set_updated_at(&mut self, updated_at: Timestamp) -> &mut Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn set_deleted_at(&mut self, deleted_at: Timestamp) -> &mut Self {
        self.deleted_at = Some(deleted_at);
        self
    }

    pub fn mark_deleted(&mut self) -> &mut Self {
        self.set_deleted_at(Timestamp::now())
    }
}

impl ContentEntity for Comment {
    fn id(&self) -> &str {
        &self.id
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }

    fn from_row(row: &Record) -> Result<Self, ContentValidationError> {
        let id = required_text(row, columns::ID)?;
        let news_id = required_text(row, columns::NEWS_ID)?;
        let body = required_text(row, columns::BODY)?;
        let created_raw = required_text(row, columns::CREATED_AT)?;

        Ok(Self {
            id,
            news_id,
            body,
            created_at: parse_timestamp(columns::CREATED_AT, created_raw)?,
            updated_at: optional_timestamp(row, columns::UPDATED_AT)?,
            deleted_at: optional_timestamp(row, columns::DELETED_AT)?,
        })
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with(columns::ID, id_value(&self.id))
            .with(columns::NEWS_ID, self.news_id.clone())
            .with(columns::BODY, self.body.clone())
            .with(columns::CREATED_AT, self.created_at)
            .with(columns::UPDATED_AT, optional_timestamp_value(self.updated_at))
            .with(columns::DELETED_AT, optional_timestamp_value(self.deleted_at))
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_json(self, f)
    }
}
