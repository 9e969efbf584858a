//! Project domain entity.
//!
//! # Invariants
//! - `client_id` is never nil and never changes after construction.
//! - Name uniqueness is scoped per client; the entity itself only enforces
//!   field-level rules.

use super::client::ClientId;
use super::name::{validate_name, NameValidationError};
use super::now_epoch_ms;
use serde::Serialize;
use uuid::Uuid;

/// Stable project identifier (UUID v7, creation ordered).
pub type ProjectId = Uuid;

/// Unit of work owned by one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    client_id: ClientId,
    name: String,
    normalized_name: String,
    /// Unix epoch milliseconds.
    created_at: i64,
}

impl Project {
    /// Creates a project for `client_id` with a generated id.
    ///
    /// # Errors
    /// - Name rules are checked first, then the client id.
    pub fn new(client_id: ClientId, name: &str) -> Result<Self, NameValidationError> {
        let valid = validate_name(name)?;
        if client_id.is_nil() {
            return Err(NameValidationError::MissingClientId);
        }

        Ok(Self {
            id: Uuid::now_v7(),
            client_id,
            name: valid.name,
            normalized_name: valid.normalized,
            created_at: now_epoch_ms(),
        })
    }

    pub(crate) fn from_parts(
        id: ProjectId,
        client_id: ClientId,
        name: String,
        normalized_name: String,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            client_id,
            name,
            normalized_name,
            created_at,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
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

    /// Renames the project after applying the name rules.
    pub fn try_set_name(&mut self, name: &str) -> Result<(), NameValidationError> {
        let valid = validate_name(name)?;
        self.name = valid.name;
        self.normalized_name = valid.normalized;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::name::NameValidationError;
    use uuid::Uuid;

    #[test]
    fn new_requires_a_client() {
        let err = Project::new(Uuid::nil(), "Website").unwrap_err();
        assert_eq!(err, NameValidationError::MissingClientId);
        assert_eq!(err.to_string(), "ClientId must be provided.");
    }

    #[test]
    fn rename_recomputes_normalized_name() {
        let client_id = Uuid::now_v7();
        let mut project = Project::new(client_id, "Website").unwrap();
        assert_eq!(project.normalized_name(), "WEBSITE");

        project.try_set_name("Lançamento ").unwrap();
        assert_eq!(project.name(), "Lançamento");
        assert_eq!(project.normalized_name(), "LANCAMENTO");
        assert_eq!(project.client_id(), client_id);
    }

    #[test]
    fn rename_to_blank_is_rejected() {
        let mut project = Project::new(Uuid::now_v7(), "Website").unwrap();
        assert_eq!(project.try_set_name("   "), Err(NameValidationError::Empty));
        assert_eq!(project.name(), "Website");
    }
}
