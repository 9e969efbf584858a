//! Shared execution frame for service use cases.
//!
//! # Responsibility
//! - Carry the explicit request correlation id through one use case.
//! - Emit `start`, outcome and `end` audit entries around every call.
//! - Convert repository failures into tagged responses.
//!
//! # Invariants
//! - Audit sink failures are logged and never change the returned response.
//! - Storage and unexpected failures reach callers only as a generic message.

use super::response::{OutcomeKind, ServiceResponse};
use crate::audit::{AuditEntry, AuditPhase, AuditSink};
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use uuid::Uuid;

/// Request correlation token passed explicitly into every use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    /// Creates a context with a fresh random request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Creates a context reusing an id assigned by the caller's transport.
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Static description of one use case.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    /// Stable event name, e.g. `client_create`.
    pub name: &'static str,
    /// Entity noun used in messages, e.g. `Client`.
    pub entity: &'static str,
    /// Gerund phrase used in the generic failure message.
    pub action: &'static str,
    /// Phrase used in the `end` entry, e.g. `Client creation`.
    pub title: &'static str,
}

/// Execution frame for a single use-case call.
pub(crate) struct UseCase<'a, A: AuditSink> {
    audit: &'a A,
    request_id: &'a str,
    operation: Operation,
    input: Option<Value>,
    started_at: Instant,
}

impl<'a, A: AuditSink> UseCase<'a, A> {
    /// Opens the frame and records the `start` entry.
    pub fn begin(
        audit: &'a A,
        ctx: &'a RequestContext,
        operation: Operation,
        message: impl Into<String>,
        input: Option<Value>,
    ) -> Self {
        let use_case = Self {
            audit,
            request_id: ctx.request_id(),
            operation,
            input,
            started_at: Instant::now(),
        };
        use_case.record(AuditPhase::Start, message.into(), None);
        use_case
    }

    /// Resolves `result` into a response and records outcome and `end`.
    pub fn finish<T: Serialize>(self, result: RepoResult<ServiceResponse<T>>) -> ServiceResponse<T> {
        let response = match result {
            Ok(response) => response,
            Err(err) => self.response_for_error(err),
        };

        let payload = self.outcome_payload(response.data.as_ref());
        self.record(phase_for(response.kind), response.message.clone(), payload);

        info!(
            "event={} module=service status={} request_id={} duration_ms={}",
            self.operation.name,
            response.kind.as_str(),
            self.request_id,
            self.started_at.elapsed().as_millis()
        );
        self.record(
            AuditPhase::End,
            format!("{} process completed.", self.operation.title),
            None,
        );
        response
    }

    fn response_for_error<T>(&self, err: RepoError) -> ServiceResponse<T> {
        match err {
            RepoError::Conflict(message) => ServiceResponse::validation_error(message),
            RepoError::NotFound(id) => {
                ServiceResponse::not_found(format!("{} ID {id} not found.", self.operation.entity))
            }
            other => {
                error!(
                    "event={} module=service status=error request_id={} error_code={} error={}",
                    self.operation.name,
                    self.request_id,
                    error_code(&other),
                    other
                );
                ServiceResponse::error(format!(
                    "An unexpected error occurred while {}.",
                    self.operation.action
                ))
            }
        }
    }

    fn outcome_payload<T: Serialize>(&self, data: Option<&T>) -> Option<Value> {
        let data = data.and_then(|value| serde_json::to_value(value).ok());
        match (&self.input, data) {
            (None, None) => None,
            (input, data) => Some(json!({ "input": input, "data": data })),
        }
    }

    fn record(&self, phase: AuditPhase, message: String, payload: Option<Value>) {
        let entry = AuditEntry {
            request_id: self.request_id.to_string(),
            operation: self.operation.name,
            phase,
            message,
            payload,
        };
        if let Err(err) = self.audit.record(&entry) {
            warn!(
                "event=audit_record module=service status=error operation={} phase={} request_id={} error={}",
                self.operation.name,
                phase.as_str(),
                self.request_id,
                err
            );
        }
    }
}

/// Serializes a request for audit payloads, skipping unserializable input.
pub(crate) fn audit_input<S: Serialize>(input: &S) -> Option<Value> {
    serde_json::to_value(input).ok()
}

fn phase_for(kind: OutcomeKind) -> AuditPhase {
    match kind {
        OutcomeKind::Success => AuditPhase::Read,
        OutcomeKind::Created => AuditPhase::Create,
        OutcomeKind::Updated => AuditPhase::Update,
        OutcomeKind::Deleted => AuditPhase::Delete,
        OutcomeKind::NotFound => AuditPhase::NotFound,
        OutcomeKind::ValidationError => AuditPhase::ValidationError,
        OutcomeKind::Error => AuditPhase::Error,
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(_) => "storage_error",
        RepoError::UninitializedConnection { .. } => "uninitialized_connection",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::Conflict(_) | RepoError::NotFound(_) => "unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::{Operation, RequestContext, UseCase};
    use crate::audit::{AuditEntry, AuditError, AuditPhase, AuditSink};
    use crate::db::DbError;
    use crate::repo::RepoError;
    use crate::service::response::{OutcomeKind, ServiceResponse};
    use std::cell::RefCell;

    const OP: Operation = Operation {
        name: "widget_create",
        entity: "Widget",
        action: "creating the widget",
        title: "Widget creation",
    };

    #[derive(Default)]
    struct RecordingSink {
        entries: RefCell<Vec<AuditEntry>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
            self.entries.borrow_mut().push(entry.clone());
            Ok(())
        }
    }

    #[test]
    fn storage_errors_become_generic_error_responses() {
        let sink = RecordingSink::default();
        let ctx = RequestContext::with_request_id("req-1");
        let use_case = UseCase::begin(&sink, &ctx, OP, "started", None);

        let response: ServiceResponse<u32> =
            use_case.finish(Err(RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))));

        assert_eq!(response.kind, OutcomeKind::Error);
        assert_eq!(response.message, "An unexpected error occurred while creating the widget.");

        let phases: Vec<AuditPhase> = sink.entries.borrow().iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![AuditPhase::Start, AuditPhase::Error, AuditPhase::End]
        );
        assert!(sink
            .entries
            .borrow()
            .iter()
            .all(|entry| entry.request_id == "req-1"));
    }

    #[test]
    fn conflicts_become_validation_errors() {
        let sink = RecordingSink::default();
        let ctx = RequestContext::new();
        let use_case = UseCase::begin(&sink, &ctx, OP, "started", None);

        let response: ServiceResponse<u32> =
            use_case.finish(Err(RepoError::Conflict("taken".to_string())));

        assert_eq!(response.kind, OutcomeKind::ValidationError);
        assert_eq!(response.message, "taken");
    }

    #[test]
    fn generated_request_ids_are_unique() {
        assert_ne!(
            RequestContext::new().request_id(),
            RequestContext::new().request_id()
        );
    }
}
