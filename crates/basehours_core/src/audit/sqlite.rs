//! SQLite-backed audit sink over the `audit_logs` table.

use super::{AuditEntry, AuditError, AuditPhase, AuditSink};
use crate::db::DbError;
use crate::model::now_epoch_ms;
use crate::repo::{ensure_connection_ready, RepoError};
use rusqlite::{params, Connection};
use serde::Serialize;

/// Persisted audit row, as read back for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogRecord {
    pub id: i64,
    pub request_id: String,
    pub operation: String,
    pub phase: AuditPhase,
    pub message: String,
    pub payload: Option<serde_json::Value>,
    pub created_at: i64,
}

/// Audit sink persisting entries next to the business tables.
pub struct SqliteAuditSink<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuditSink<'conn> {
    /// Constructs a sink from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> Result<Self, RepoError> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Lists entries for one request in insertion order.
    pub fn entries_for_request(&self, request_id: &str) -> Result<Vec<AuditLogRecord>, AuditError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, request_id, operation, phase, message, payload, created_at
             FROM audit_logs
             WHERE request_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([request_id])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let phase_text: String = row.get("phase")?;
            let phase = AuditPhase::parse(&phase_text).ok_or_else(|| {
                AuditError::Unavailable(format!("invalid phase `{phase_text}` in audit_logs.phase"))
            })?;
            let payload = match row.get::<_, Option<String>>("payload")? {
                Some(text) => Some(serde_json::from_str(&text)?),
                None => None,
            };
            records.push(AuditLogRecord {
                id: row.get("id")?,
                request_id: row.get("request_id")?,
                operation: row.get("operation")?,
                phase,
                message: row.get("message")?,
                payload,
                created_at: row.get("created_at")?,
            });
        }

        Ok(records)
    }
}

impl AuditSink for SqliteAuditSink<'_> {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let payload = entry
            .payload
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn
            .execute(
                "INSERT INTO audit_logs (
                    request_id,
                    operation,
                    phase,
                    message,
                    payload,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    entry.request_id.as_str(),
                    entry.operation,
                    entry.phase.as_str(),
                    entry.message.as_str(),
                    payload,
                    now_epoch_ms(),
                ],
            )
            .map_err(|err| AuditError::Storage(DbError::Sqlite(err)))?;
        Ok(())
    }
}
