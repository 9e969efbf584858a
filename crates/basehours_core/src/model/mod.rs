//! Domain model for clients and projects.
//!
//! # Responsibility
//! - Define the entity records shared by repositories and services.
//! - Enforce field-level name rules at construction and rename time.
//!
//! # Invariants
//! - Every entity is identified by a stable, time-ordered UUID v7.
//! - `normalized_name` always equals `normalize(name)`.
//! - Deletion is a hard delete; entities carry no tombstone state.

pub mod client;
pub mod name;
pub mod project;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall clock as Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
