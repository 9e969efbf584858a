//! Audit trail collaborator for service use cases.
//!
//! # Responsibility
//! - Define the audit entry shape and the sink contract.
//! - Provide log-backed, SQLite-backed and no-op sinks.
//!
//! # Invariants
//! - Sinks never decide use-case outcomes; callers treat `record` as
//!   best-effort and only report its failure.
//! - Every entry carries the request correlation id of its use case.

mod sqlite;

pub use sqlite::{AuditLogRecord, SqliteAuditSink};

use crate::db::DbError;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle phase of a use case an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditPhase {
    Start,
    Info,
    ValidationError,
    NotFound,
    Create,
    Read,
    Update,
    Delete,
    Error,
    End,
}

impl AuditPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Info => "info",
            Self::ValidationError => "validation_error",
            Self::NotFound => "not_found",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Error => "error",
            Self::End => "end",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "info" => Some(Self::Info),
            "validation_error" => Some(Self::ValidationError),
            "not_found" => Some(Self::NotFound),
            "create" => Some(Self::Create),
            "read" => Some(Self::Read),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "error" => Some(Self::Error),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// One audit record emitted by a use case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub request_id: String,
    /// Use-case name, e.g. `client_create`.
    pub operation: &'static str,
    pub phase: AuditPhase,
    pub message: String,
    /// Request input and/or produced DTO.
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug)]
pub enum AuditError {
    Storage(DbError),
    Serialize(serde_json::Error),
    /// Sink-specific failure without an underlying error value.
    Unavailable(String),
}

impl Display for AuditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "audit storage failed: {err}"),
            Self::Serialize(err) => write!(f, "audit payload serialization failed: {err}"),
            Self::Unavailable(message) => write!(f, "audit sink unavailable: {message}"),
        }
    }
}

impl Error for AuditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for AuditError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Destination for audit entries.
pub trait AuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

impl<T: AuditSink + ?Sized> AuditSink for &T {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        (**self).record(entry)
    }
}

/// Writes audit entries to the diagnostic log under target `audit`.
///
/// Payloads are omitted; only metadata reaches the log files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        info!(
            target: "audit",
            "event=audit module=audit phase={} operation={} request_id={} has_payload={} message={}",
            entry.phase.as_str(),
            entry.operation,
            entry.request_id,
            entry.payload.is_some(),
            crate::logging::sanitize_message(&entry.message, 200)
        );
        Ok(())
    }
}

/// Discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _entry: &AuditEntry) -> Result<(), AuditError> {
        Ok(())
    }
}
