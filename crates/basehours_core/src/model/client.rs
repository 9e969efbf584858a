//! Client domain entity.
//!
//! # Responsibility
//! - Own the client identity, display name and its comparison key.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once and never change.
//! - `normalized_name` is recomputed on every accepted rename.
//! - A rejected rename leaves the entity unchanged.

use super::name::{validate_name, NameValidationError};
use super::now_epoch_ms;
use serde::Serialize;
use uuid::Uuid;

/// Stable client identifier (UUID v7, creation ordered).
pub type ClientId = Uuid;

/// Customer billed for tracked hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    id: ClientId,
    name: String,
    normalized_name: String,
    /// Unix epoch milliseconds.
    created_at: i64,
}

impl Client {
    /// Creates a client with a generated id and the current timestamp.
    ///
    /// # Errors
    /// - Returns the first failing name rule; no client is produced.
    pub fn new(name: &str) -> Result<Self, NameValidationError> {
        let valid = validate_name(name)?;
        Ok(Self {
            id: Uuid::now_v7(),
            name: valid.name,
            normalized_name: valid.normalized,
            created_at: now_epoch_ms(),
        })
    }

    /// Rebuilds a client from persisted columns without re-validating.
    pub(crate) fn from_parts(
        id: ClientId,
        name: String,
        normalized_name: String,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name,
            normalized_name,
            created_at,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Renames the client after applying the name rules.
    pub fn try_set_name(&mut self, name: &str) -> Result<(), NameValidationError> {
        let valid = validate_name(name)?;
        self.name = valid.name;
        self.normalized_name = valid.normalized;
        Ok(())
    }
}
