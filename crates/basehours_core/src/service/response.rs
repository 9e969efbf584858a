//! Tagged use-case results consumed by outer boundaries.

use serde::Serialize;

/// Outcome category of one use-case call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Created,
    Updated,
    Deleted,
    NotFound,
    ValidationError,
    Error,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::NotFound => "not_found",
            Self::ValidationError => "validation_error",
            Self::Error => "error",
        }
    }

    /// HTTP-equivalent status code for transport adapters.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Success | Self::Updated | Self::Deleted => 200,
            Self::Created => 201,
            Self::NotFound => 404,
            Self::ValidationError => 400,
            Self::Error => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Created | Self::Updated | Self::Deleted
        )
    }
}

/// Response envelope: outcome kind, user-facing message and optional data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResponse<T> {
    pub kind: OutcomeKind,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ServiceResponse<T> {
    fn with(kind: OutcomeKind, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            kind,
            message: message.into(),
            data,
        }
    }

    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::with(OutcomeKind::Success, message, Some(data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with(OutcomeKind::Created, message, Some(data))
    }

    pub fn updated(message: impl Into<String>, data: T) -> Self {
        Self::with(OutcomeKind::Updated, message, Some(data))
    }

    pub fn deleted(message: impl Into<String>, data: T) -> Self {
        Self::with(OutcomeKind::Deleted, message, Some(data))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with(OutcomeKind::NotFound, message, None)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::with(OutcomeKind::ValidationError, message, None)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with(OutcomeKind::Error, message, None)
    }

    pub fn is_success(&self) -> bool {
        self.kind.is_success()
    }
}
