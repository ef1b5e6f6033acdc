//! Shared content capability set and field conversions.
//!
//! # Responsibility
//! - Define the `ContentEntity` contract implemented by `News` and `Comment`.
//! - Own the textual timestamp form used by every content column.
//! - Validate required columns when reconstructing entities from rows.
//!
//! # Invariants
//! - Timestamps render as `YYYY-MM-DD HH:MM:SS` with no sub-second part.
//! - A required column that is absent, `NULL` or empty fails reconstruction.

use crate::db::Record;
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::types::Value;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column names shared by the `news` and `comment` tables.
pub mod columns {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const NEWS_ID: &str = "newsId";
    pub const BODY: &str = "body";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const DELETED_AT: &str = "deletedAt";
}

/// Render/parse format for every persisted timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_DATETIME_FORMATS: &[&str] = &[TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S"];
const ACCEPTED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Second-precision local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Parses `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare
    /// `YYYY-MM-DD` (midnight).
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        for format in ACCEPTED_DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(Self::from_datetime(parsed));
            }
        }

        NaiveDate::parse_from_str(trimmed, ACCEPTED_DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Text(value.to_string())
    }
}

/// Reconstruction failure for a persisted content row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    /// Required column is absent, `NULL` or empty.
    MissingField(&'static str),
    /// Timestamp column does not match any accepted format.
    InvalidTimestamp { field: &'static str, value: String },
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required attribute `{field}`"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid timestamp `{value}` in `{field}`")
            }
        }
    }
}

impl Error for ContentValidationError {}

/// Capability set shared by persisted content entities.
pub trait ContentEntity: Sized + Display {
    /// Database-assigned identifier; empty until the entity is saved.
    fn id(&self) -> &str;
    fn body(&self) -> &str;
    fn created_at(&self) -> Timestamp;
    fn updated_at(&self) -> Option<Timestamp>;
    /// Soft-delete marker. Listing never filters on it.
    fn deleted_at(&self) -> Option<Timestamp>;

    /// Rebuilds an entity from one persisted row.
    ///
    /// # Errors
    /// - `MissingField` when any required column is absent, `NULL` or empty.
    /// - `InvalidTimestamp` when a timestamp column cannot be parsed.
    fn from_row(row: &Record) -> Result<Self, ContentValidationError>;

    /// Converts the entity into its full row representation.
    fn to_record(&self) -> Record;
}

pub(crate) fn required_text(
    row: &Record,
    field: &'static str,
) -> Result<String, ContentValidationError> {
    row.text(field)
        .filter(|value| !value.is_empty())
        .ok_or(ContentValidationError::MissingField(field))
}

pub(crate) fn parse_timestamp(
    field: &'static str,
    raw: String,
) -> Result<Timestamp, ContentValidationError> {
    Timestamp::parse(&raw).ok_or(ContentValidationError::InvalidTimestamp { field, value: raw })
}

pub(crate) fn optional_timestamp(
    row: &Record,
    field: &'static str,
) -> Result<Option<Timestamp>, ContentValidationError> {
    match row.text(field).filter(|value| !value.is_empty()) {
        Some(raw) => parse_timestamp(field, raw).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn id_value(id: &str) -> Value {
    if id.is_empty() {
        Value::Null
    } else {
        Value::Text(id.to_string())
    }
}

pub(crate) fn optional_timestamp_value(value: Option<Timestamp>) -> Value {
    value.map_or(Value::Null, Value::from)
}

pub(crate) fn write_json<T: Serialize>(value: &T, f: &mut Formatter<'_>) -> std::fmt::Result {
    let json = serde_json::to_string(value).map_err(|_| std::fmt::Error)?;
    f.write_str(&json)
}

#[cfg(test)]
mod tests {
    use super::{required_text, ContentValidationError, Timestamp};
    use crate::db::Record;

    #[test]
    fn parse_accepts_supported_forms() {
        let full = Timestamp::parse("2024-01-01 08:30:05").unwrap();
        assert_eq!(full.to_string(), "2024-01-01 08:30:05");

        let iso = Timestamp::parse("2024-01-01T08:30:05").unwrap();
        assert_eq!(iso, full);

        let date_only = Timestamp::parse("2024-01-01").unwrap();
        assert_eq!(date_only.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn now_has_no_sub_second_part() {
        let now = Timestamp::now();
        assert_eq!(Timestamp::parse(&now.to_string()), Some(now));
    }

    #[test]
    fn required_text_accepts_whitespace_but_rejects_empty() {
        let spaced = Record::new().with("body", "   ".to_string());
        assert_eq!(required_text(&spaced, "body").as_deref(), Ok("   "));

        let empty = Record::new().with("body", String::new());
        assert_eq!(
            required_text(&empty, "body"),
            Err(ContentValidationError::MissingField("body"))
        );
    }
}
