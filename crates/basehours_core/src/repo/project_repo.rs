//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, search and per-client duplicate checks over `projects`.
//! - Join the owning client's display name into read models.
//!
//! # Invariants
//! - Name uniqueness is scoped to `(client_id, normalized_name)`.
//! - Listing order is `created_at ASC, id ASC`.
//! - Writes never change `client_id`.

use super::{ensure_connection_ready, map_write_error, parse_uuid, Constraint};
use super::{RepoError, RepoResult};
use crate::model::client::ClientId;
use crate::model::project::{Project, ProjectId};
use crate::normalize::normalize;
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.client_id AS client_id,
    p.name AS name,
    p.normalized_name AS normalized_name,
    p.created_at AS created_at,
    c.name AS client_name
FROM projects p
INNER JOIN clients c ON c.id = p.client_id";

pub const DUPLICATE_PROJECT_MESSAGE: &str =
    "A project with this name already exists for this client.";
pub const MISSING_CLIENT_MESSAGE: &str = "Associated client not found.";

/// Read model pairing a project with its owning client's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub project: Project,
    pub client_name: String,
}

/// Repository interface for project persistence.
pub trait ProjectRepository {
    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<ProjectRecord>>;
    fn get_all(&self) -> RepoResult<Vec<ProjectRecord>>;
    /// Case- and accent-insensitive containment match on the name.
    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<ProjectRecord>>;
    /// Returns whether `client_id` already owns a project with the normalized
    /// form of `name`.
    fn exists_by_name(&self, name: &str, client_id: ClientId) -> RepoResult<bool>;
    fn add(&self, project: &Project) -> RepoResult<()>;
    fn update(&self, project: &Project) -> RepoResult<()>;
    fn delete(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_records(
        &self,
        sql: &str,
        bind: &[&dyn rusqlite::ToSql],
    ) -> RepoResult<Vec<ProjectRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_project_row(row)?);
        }
        Ok(records)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<ProjectRecord>> {
        let id_text = id.to_string();
        let mut records =
            self.query_records(&format!("{PROJECT_SELECT_SQL} WHERE p.id = ?1;"), &[&id_text])?;
        Ok(records.pop())
    }

    fn get_all(&self) -> RepoResult<Vec<ProjectRecord>> {
        self.query_records(
            &format!("{PROJECT_SELECT_SQL} ORDER BY p.created_at ASC, p.id ASC;"),
            &[],
        )
    }

    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<ProjectRecord>> {
        let needle = normalize(fragment);
        self.query_records(
            &format!(
                "{PROJECT_SELECT_SQL}
                 WHERE instr(p.normalized_name, ?1) > 0
                 ORDER BY p.created_at ASC, p.id ASC;"
            ),
            &[&needle],
        )
    }

    fn exists_by_name(&self, name: &str, client_id: ClientId) -> RepoResult<bool> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1
                 FROM projects
                 WHERE client_id = ?1
                   AND normalized_name = ?2
                 LIMIT 1;",
                params![client_id.to_string(), normalize(name)],
                |_| Ok(()),
            )
            .optional()?;
        Ok(exists.is_some())
    }

    fn add(&self, project: &Project) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO projects (
                    id,
                    client_id,
                    name,
                    normalized_name,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    project.id().to_string(),
                    project.client_id().to_string(),
                    project.name(),
                    project.normalized_name(),
                    project.created_at(),
                ],
            )
            .map_err(|err| map_write_error(err, project_write_conflict))?;
        Ok(())
    }

    fn update(&self, project: &Project) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE projects
                 SET
                    name = ?1,
                    normalized_name = ?2
                 WHERE id = ?3;",
                params![
                    project.name(),
                    project.normalized_name(),
                    project.id().to_string(),
                ],
            )
            .map_err(|err| map_write_error(err, project_write_conflict))?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id()));
        }
        Ok(())
    }

    fn delete(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn project_write_conflict(constraint: Constraint) -> Option<&'static str> {
    match constraint {
        Constraint::Unique => Some(DUPLICATE_PROJECT_MESSAGE),
        Constraint::ForeignKey => Some(MISSING_CLIENT_MESSAGE),
        Constraint::Other => None,
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<ProjectRecord> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "projects.id")?;
    let client_id_text: String = row.get("client_id")?;
    let client_id = parse_uuid(&client_id_text, "projects.client_id")?;
    let name: String = row.get("name")?;
    let normalized_name: String = row.get("normalized_name")?;

    if normalized_name != normalize(&name) {
        return Err(RepoError::InvalidData(format!(
            "projects.normalized_name out of sync for project {id}"
        )));
    }

    Ok(ProjectRecord {
        project: Project::from_parts(id, client_id, name, normalized_name, row.get("created_at")?),
        client_name: row.get("client_name")?,
    })
}
