//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service orchestration.
//! - Translate storage constraint violations into domain conflicts.
//!
//! # Invariants
//! - Repositories only accept fully migrated connections (`try_new`).
//! - Missing targets of `update`/`delete` surface as `RepoError::NotFound`.
//! - Name lookups compare normalized keys, never raw display names.

pub mod client_repo;
pub mod project_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for client/project persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target row does not exist.
    NotFound(Uuid),
    /// Write rejected by a uniqueness or foreign-key constraint.
    Conflict(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, found {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Constraint family reported by SQLite for a rejected write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
    Other,
}

pub(crate) fn constraint_of(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Constraint::Unique,
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Constraint::ForeignKey,
                _ => Constraint::Other,
            })
        }
        _ => None,
    }
}

/// Maps a write error to `Conflict` when `message_for` recognizes its
/// constraint family, or to `Db` otherwise.
pub(crate) fn map_write_error(
    err: rusqlite::Error,
    message_for: impl Fn(Constraint) -> Option<&'static str>,
) -> RepoError {
    match constraint_of(&err).and_then(message_for) {
        Some(message) => RepoError::Conflict(message.to_string()),
        None => err.into(),
    }
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}
