//! Project use-case service.
//!
//! # Responsibility
//! - Orchestrate client lookup, per-client duplicate checks and persistence.
//! - Shape results into `ServiceResponse<ProjectDto>` envelopes.
//!
//! # Invariants
//! - A project is only created under an existing client.
//! - Duplicate names are only rejected within the same client.

use super::dto::{ProjectDto, ProjectRequest, ProjectUpdateRequest};
use super::response::ServiceResponse;
use super::use_case::{audit_input, Operation, RequestContext, UseCase};
use crate::audit::AuditSink;
use crate::model::project::{Project, ProjectId};
use crate::repo::client_repo::ClientRepository;
use crate::repo::project_repo::{
    ProjectRecord, ProjectRepository, DUPLICATE_PROJECT_MESSAGE, MISSING_CLIENT_MESSAGE,
};
use crate::repo::RepoResult;
use uuid::Uuid;

const CREATE: Operation = Operation {
    name: "project_create",
    entity: "Project",
    action: "creating the project",
    title: "Project creation",
};
const UPDATE: Operation = Operation {
    name: "project_update",
    entity: "Project",
    action: "updating the project",
    title: "Project update",
};
const DELETE: Operation = Operation {
    name: "project_delete",
    entity: "Project",
    action: "deleting the project",
    title: "Project deletion",
};
const GET: Operation = Operation {
    name: "project_get",
    entity: "Project",
    action: "retrieving the project",
    title: "Project retrieval by ID",
};
const LIST: Operation = Operation {
    name: "project_list",
    entity: "Project",
    action: "retrieving projects",
    title: "Project retrieval",
};
const SEARCH: Operation = Operation {
    name: "project_search",
    entity: "Project",
    action: "searching projects",
    title: "Project search",
};

/// Use-case service for projects.
///
/// Holds a client repository only to verify ownership on create.
pub struct ProjectService<P: ProjectRepository, C: ClientRepository, A: AuditSink> {
    projects: P,
    clients: C,
    audit: A,
}

impl<P: ProjectRepository, C: ClientRepository, A: AuditSink> ProjectService<P, C, A> {
    pub fn new(projects: P, clients: C, audit: A) -> Self {
        Self {
            projects,
            clients,
            audit,
        }
    }

    /// Creates a project under an existing client.
    pub fn create(
        &self,
        ctx: &RequestContext,
        request: &ProjectRequest,
    ) -> ServiceResponse<ProjectDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            CREATE,
            "Project creation process started.",
            audit_input(request),
        );
        use_case.finish(self.create_inner(request))
    }

    fn create_inner(&self, request: &ProjectRequest) -> RepoResult<ServiceResponse<ProjectDto>> {
        if self
            .projects
            .exists_by_name(&request.name, request.client_id)?
        {
            return Ok(ServiceResponse::validation_error(DUPLICATE_PROJECT_MESSAGE));
        }

        let Some(client) = self.clients.get_by_id(request.client_id)? else {
            return Ok(ServiceResponse::validation_error(MISSING_CLIENT_MESSAGE));
        };

        let project = match Project::new(client.id(), &request.name) {
            Ok(project) => project,
            Err(err) => return Ok(ServiceResponse::validation_error(err.to_string())),
        };
        self.projects.add(&project)?;

        let record = ProjectRecord {
            project,
            client_name: client.name().to_string(),
        };
        Ok(ServiceResponse::created(
            "Project created successfully.",
            ProjectDto::from(&record),
        ))
    }

    /// Renames an existing project; its client never changes.
    pub fn update(
        &self,
        ctx: &RequestContext,
        request: &ProjectUpdateRequest,
    ) -> ServiceResponse<ProjectDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            UPDATE,
            format!("Updating project ID: {}", request.id),
            audit_input(request),
        );
        use_case.finish(self.update_inner(request))
    }

    fn update_inner(
        &self,
        request: &ProjectUpdateRequest,
    ) -> RepoResult<ServiceResponse<ProjectDto>> {
        let Some(mut record) = self.projects.get_by_id(request.id)? else {
            return Ok(ServiceResponse::not_found(format!(
                "Project ID {} not found.",
                request.id
            )));
        };

        if let Err(err) = record.project.try_set_name(&request.name) {
            return Ok(ServiceResponse::validation_error(err.to_string()));
        }
        self.projects.update(&record.project)?;

        Ok(ServiceResponse::updated(
            format!("Project ID {} updated successfully.", request.id),
            ProjectDto::from(&record),
        ))
    }

    pub fn delete(&self, ctx: &RequestContext, id: ProjectId) -> ServiceResponse<ProjectId> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            DELETE,
            format!("Deleting project ID: {id}"),
            audit_input(&id),
        );
        use_case.finish(self.delete_inner(id))
    }

    fn delete_inner(&self, id: ProjectId) -> RepoResult<ServiceResponse<ProjectId>> {
        if self.projects.get_by_id(id)?.is_none() {
            return Ok(ServiceResponse::not_found(format!("Project ID {id} not found.")));
        }

        self.projects.delete(id)?;
        Ok(ServiceResponse::deleted(
            format!("Project ID {id} deleted successfully."),
            id,
        ))
    }

    /// Reads one project by its textual id.
    pub fn get_by_id(&self, ctx: &RequestContext, raw_id: &str) -> ServiceResponse<ProjectDto> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            GET,
            format!("Retrieving project ID: {raw_id}"),
            audit_input(&raw_id),
        );
        use_case.finish(self.get_inner(raw_id))
    }

    fn get_inner(&self, raw_id: &str) -> RepoResult<ServiceResponse<ProjectDto>> {
        let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
            return Ok(ServiceResponse::validation_error("Invalid project ID format."));
        };

        Ok(match self.projects.get_by_id(id)? {
            Some(record) => ServiceResponse::success(
                format!("Project ID {id} retrieved successfully."),
                ProjectDto::from(&record),
            ),
            None => ServiceResponse::not_found(format!("Project ID {id} not found.")),
        })
    }

    pub fn get_all(&self, ctx: &RequestContext) -> ServiceResponse<Vec<ProjectDto>> {
        let use_case = UseCase::begin(&self.audit, ctx, LIST, "Retrieving all projects.", None);
        use_case.finish(self.projects.get_all().map(|records| {
            let message = if records.is_empty() {
                "No projects found.".to_string()
            } else {
                format!("Projects retrieved successfully. Total: {}.", records.len())
            };
            ServiceResponse::success(message, to_dtos(&records))
        }))
    }

    /// Lists projects whose name contains `name`, ignoring case and accents.
    pub fn search_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> ServiceResponse<Vec<ProjectDto>> {
        let use_case = UseCase::begin(
            &self.audit,
            ctx,
            SEARCH,
            format!("Searching projects by name: '{name}'"),
            audit_input(&name),
        );
        use_case.finish(self.projects.search_by_name(name).map(|records| {
            let message = if records.is_empty() {
                format!("No projects found with the name '{name}'.")
            } else {
                format!(
                    "Projects found with the name '{name}'. Total: {}.",
                    records.len()
                )
            };
            ServiceResponse::success(message, to_dtos(&records))
        }))
    }
}

fn to_dtos(records: &[ProjectRecord]) -> Vec<ProjectDto> {
    records.iter().map(ProjectDto::from).collect()
}
