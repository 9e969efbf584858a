//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, search and duplicate-name checks over `clients`.
//!
//! # Invariants
//! - Listing order is `created_at ASC, id ASC`.
//! - `ix_clients_normalized_name` is the final arbiter of duplicate names.
//! - Clients referenced by projects cannot be deleted (`ON DELETE RESTRICT`).

use super::{ensure_connection_ready, map_write_error, parse_uuid, Constraint};
use super::{RepoError, RepoResult};
use crate::model::client::{Client, ClientId};
use crate::normalize::normalize;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLIENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    normalized_name,
    created_at
FROM clients";

pub const DUPLICATE_CLIENT_MESSAGE: &str = "A client with this name already exists.";
pub const CLIENT_IN_USE_MESSAGE: &str = "Client has associated projects and cannot be deleted.";

/// Repository interface for client persistence.
pub trait ClientRepository {
    fn get_by_id(&self, id: ClientId) -> RepoResult<Option<Client>>;
    fn get_all(&self) -> RepoResult<Vec<Client>>;
    /// Case- and accent-insensitive containment match on the name.
    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Client>>;
    /// Returns whether any client already uses the normalized form of `name`.
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    fn add(&self, client: &Client) -> RepoResult<()>;
    fn update(&self, client: &Client) -> RepoResult<()>;
    fn delete(&self, id: ClientId) -> RepoResult<()>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_clients(&self, sql: &str, bind: &[&dyn rusqlite::ToSql]) -> RepoResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn get_by_id(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Client>> {
        self.query_clients(
            &format!("{CLIENT_SELECT_SQL} ORDER BY created_at ASC, id ASC;"),
            &[],
        )
    }

    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Client>> {
        let needle = normalize(fragment);
        self.query_clients(
            &format!(
                "{CLIENT_SELECT_SQL}
                 WHERE instr(normalized_name, ?1) > 0
                 ORDER BY created_at ASC, id ASC;"
            ),
            &[&needle],
        )
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM clients WHERE normalized_name = ?1 LIMIT 1;",
                [normalize(name)],
                |_| Ok(()),
            )
            .optional()?;
        Ok(exists.is_some())
    }

    fn add(&self, client: &Client) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO clients (
                    id,
                    name,
                    normalized_name,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    client.id().to_string(),
                    client.name(),
                    client.normalized_name(),
                    client.created_at(),
                ],
            )
            .map_err(|err| map_write_error(err, client_write_conflict))?;
        Ok(())
    }

    fn update(&self, client: &Client) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE clients
                 SET
                    name = ?1,
                    normalized_name = ?2
                 WHERE id = ?3;",
                params![
                    client.name(),
                    client.normalized_name(),
                    client.id().to_string(),
                ],
            )
            .map_err(|err| map_write_error(err, client_write_conflict))?;

        if changed == 0 {
            return Err(RepoError::NotFound(client.id()));
        }
        Ok(())
    }

    fn delete(&self, id: ClientId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id.to_string()])
            .map_err(|err| {
                map_write_error(err, |constraint| match constraint {
                    Constraint::ForeignKey => Some(CLIENT_IN_USE_MESSAGE),
                    _ => None,
                })
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn client_write_conflict(constraint: Constraint) -> Option<&'static str> {
    match constraint {
        Constraint::Unique => Some(DUPLICATE_CLIENT_MESSAGE),
        _ => None,
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "clients.id")?;
    let name: String = row.get("name")?;
    let normalized_name: String = row.get("normalized_name")?;

    if normalized_name != normalize(&name) {
        return Err(RepoError::InvalidData(format!(
            "clients.normalized_name out of sync for client {id}"
        )));
    }

    Ok(Client::from_parts(
        id,
        name,
        normalized_name,
        row.get("created_at")?,
    ))
}
