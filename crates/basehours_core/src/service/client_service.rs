//! Client use-case service.
//!
//! # Responsibility
//! - Orchestrate duplicate checks, entity validation and persistence.
//! - Shape results into `ServiceResponse<ClientDto>` envelopes.
//!
//! # Invariants
//! - Every call returns a definite outcome; empty listings are `Success`.
//! - The duplicate pre-check is advisory; the unique index decides races.

use super::dto::{ClientDto, ClientRequest, ClientUpdateRequest};
use super::response::ServiceResponse;
use super::use_case::{audit_input, Operation, RequestContext, UseCase};
use crate::audit::AuditSink;
use crate::model::client::{Client, ClientId};
use crate::repo::client_repo::{ClientRepository, DUPLICATE_CLIENT_MESSAGE};
use crate::repo::RepoResult;
use uuid::Uuid;

const CREATE: Operation = Operation {
    name: "client_create",
    entity: "Client",
    action: "creating the client",
    title: "Client creation",
};
const UPDATE: Operation = Operation {
    name: "client_update",
    entity: "Client",
    action: "updating the client",
    title: "Client update",
};
const DELETE: Operation = Operation {
    name: "client_delete",
    entity: "Client",
    action: "deleting the client",
    title: "Client deletion",
};
const GET: Operation = Operation {
    name: "client_get",
    entity: "Client",
    action: "retrieving the client",
    title: "Client retrieval by ID",
};
const LIST: Operation = Operation {
    name: "client_list",
    entity: "Client",
    action: "retrieving clients",
    title: "Client retrieval",
};
const SEARCH: Operation = Operation {
    name: "client_search",
    entity: "Client",
    action: "searching clients",
    title: "Client search",
};

/// Use-case service for clients.
pub struct ClientService<R: ClientRepository, A: AuditSink> {
    repo: R,
    audit: A,
}

impl<R: ClientRepository, A: AuditSink> ClientService<R, A> {
    pub fn new(repo: R, audit: A) -> Self {
        Self { repo, audit }
    }

    /// Creates a client unless its normalized name is already taken.
    pub fn create(
        &self,
        ctx: &RequestContext,
        request: &ClientRequest,
    ) -> ServiceResponse<ClientDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            CREATE,
            "Client creation process started.",
            audit_input(request),
        );
        use_case.finish(self.create_inner(request))
    }

    fn create_inner(&self, request: &ClientRequest) -> RepoResult<ServiceResponse<ClientDto>> {
        if self.repo.exists_by_name(&request.name)? {
            return Ok(ServiceResponse::validation_error(DUPLICATE_CLIENT_MESSAGE));
        }

        let client = match Client::new(&request.name) {
            Ok(client) => client,
            Err(err) => return Ok(ServiceResponse::validation_error(err.to_string())),
        };
        self.repo.add(&client)?;

        Ok(ServiceResponse::created(
            "Client created successfully.",
            ClientDto::from(&client),
        ))
    }

    /// Renames an existing client.
    pub fn update(
        &self,
        ctx: &RequestContext,
        request: &ClientUpdateRequest,
    ) -> ServiceResponse<ClientDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            UPDATE,
            format!("Updating client ID: {}", request.id),
            audit_input(request),
        );
        use_case.finish(self.update_inner(request))
    }

    fn update_inner(&self, request: &ClientUpdateRequest) -> RepoResult<ServiceResponse<ClientDto>> {
        let Some(mut client) = self.repo.get_by_id(request.id)? else {
            return Ok(ServiceResponse::not_found(format!(
                "Client ID {} not found.",
                request.id
            )));
        };

        if let Err(err) = client.try_set_name(&request.name) {
            return Ok(ServiceResponse::validation_error(err.to_string()));
        }
        self.repo.update(&client)?;

        Ok(ServiceResponse::updated(
            format!("Client ID {} updated successfully.", client.id()),
            ClientDto::from(&client),
        ))
    }

    /// Hard-deletes a client that no project references.
    pub fn delete(&self, ctx: &RequestContext, id: ClientId) -> ServiceResponse<ClientId> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            DELETE,
            format!("Deleting client ID: {id}"),
            audit_input(&id),
        );
        use_case.finish(self.delete_inner(id))
    }

    fn delete_inner(&self, id: ClientId) -> RepoResult<ServiceResponse<ClientId>> {
        if self.repo.get_by_id(id)?.is_none() {
            return Ok(ServiceResponse::not_found(format!("Client ID {id} not found.")));
        }

        self.repo.delete(id)?;
        Ok(ServiceResponse::deleted(
            format!("Client ID {id} deleted successfully."),
            id,
        ))
    }

    /// Reads one client by its textual id.
    pub fn get_by_id(&self, ctx: &RequestContext, raw_id: &str) -> ServiceResponse<ClientDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            GET,
            format!("Retrieving client ID: {raw_id}"),
            audit_input(&raw_id),
        );
        use_case.finish(self.get_inner(raw_id))
    }

    fn get_inner(&self, raw_id: &str) -> RepoResult<ServiceResponse<ClientDto>> {
        let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
            return Ok(ServiceResponse::validation_error("Invalid client ID format."));
        };

        Ok(match self.repo.get_by_id(id)? {
            Some(client) => ServiceResponse::success(
                format!("Client ID {id} retrieved successfully."),
                ClientDto::from(&client),
            ),
            None => ServiceResponse::not_found(format!("Client ID {id} not found.")),
        })
    }

    /// Lists all clients in creation order.
    pub fn get_all(&self, ctx: &RequestContext) -> ServiceResponse<Vec<ClientDto>> {
        let use_case = UseCase::begin(&self.audit, ctx, LIST, "Retrieving all clients.", None);
        use_case.finish(self.repo.get_all().map(|clients| {
            let message = if clients.is_empty() {
                "No clients found.".to_string()
            } else {
                format!("Clients retrieved successfully. Total: {}.", clients.len())
            };
            ServiceResponse::success(message, to_dtos(&clients))
        }))
    }

    /// Lists clients whose name contains `name`, ignoring case and accents.
    pub fn search_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> ServiceResponse<Vec<ClientDto>> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            SEARCH,
            format!("Searching clients by name: '{name}'"),
            audit_input(&name),
        );
        use_case.finish(self.repo.search_by_name(name).map(|clients| {
            let message = if clients.is_empty() {
                format!("No clients found with the name '{name}'.")
            } else {
                format!(
                    "Clients found with the name '{name}'. Total: {}.",
                    clients.len()
                )
            };
            ServiceResponse::success(message, to_dtos(&clients))
        }))
    }
}

fn to_dtos(clients: &[Client]) -> Vec<ClientDto> {
    clients.iter().map(ClientDto::from).collect()
}
