//! Content domain model.
//!
//! # Responsibility
//! - Define the in-memory form of `news` and `comment` rows.
//! - Convert entities to and from their row representation.
//!
//! # Invariants
//! - Entities rebuilt from rows always carry id, body and creation time.
//! - `deletedAt` is a marker only; nothing in core filters on it.

pub mod comment;
pub mod content;
pub mod news;
