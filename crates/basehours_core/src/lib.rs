//! Core domain logic for BaseHours client/project tracking.
//! This crate is the single source of truth for business invariants.

pub mod audit;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod repo;
pub mod service;

pub use audit::{
    AuditEntry, AuditError, AuditLogRecord, AuditPhase, AuditSink, LogAuditSink, NoopAuditSink,
    SqliteAuditSink,
};
pub use config::{ConfigError, CoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::client::{Client, ClientId};
pub use model::name::NameValidationError;
pub use model::project::{Project, ProjectId};
pub use normalize::normalize;
pub use repo::client_repo::{ClientRepository, SqliteClientRepository};
pub use repo::project_repo::{ProjectRecord, ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use service::client_service::ClientService;
pub use service::dto::{
    ClientDto, ClientRequest, ClientUpdateRequest, ProjectDto, ProjectRequest,
    ProjectUpdateRequest,
};
pub use service::project_service::ProjectService;
pub use service::response::{OutcomeKind, ServiceResponse};
pub use service::RequestContext;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
