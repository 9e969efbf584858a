//! Request and response shapes for client/project use cases.

use crate::model::client::{Client, ClientId};
use crate::model::project::ProjectId;
use crate::repo::project_repo::ProjectRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdateRequest {
    pub id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: ClientId,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl From<&Client> for ClientDto {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id(),
            name: client.name().to_string(),
            created_at: client.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub client_id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdateRequest {
    pub id: ProjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: ProjectId,
    pub name: String,
    pub client_id: ClientId,
    pub client_name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl From<&ProjectRecord> for ProjectDto {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.project.id(),
            name: record.project.name().to_string(),
            client_id: record.project.client_id(),
            client_name: record.client_name.clone(),
            created_at: record.project.created_at(),
        }
    }
}
