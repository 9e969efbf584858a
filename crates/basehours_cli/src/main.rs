//! Command-line front end for the BaseHours core.
//!
//! # Responsibility
//! - Map subcommands onto client/project use cases.
//! - Print each `ServiceResponse` as JSON and map its kind to an exit code.
//! - Persist audit entries to `audit_logs` unless another sink is chosen.

use anyhow::{Context, Result};
use basehours_core::db::open_configured;
use basehours_core::{
    init_logging_from_config, AuditEntry, AuditError, AuditSink, ClientRequest, ClientService,
    ClientUpdateRequest, CoreConfig, LogAuditSink, NoopAuditSink, OutcomeKind, ProjectRequest,
    ProjectService, ProjectUpdateRequest, RequestContext, ServiceResponse, SqliteAuditSink,
    SqliteClientRepository, SqliteProjectRepository,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "basehours", version, about = "Manage BaseHours clients and projects")]
struct Cli {
    /// SQLite database file; falls back to BASEHOURS_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level; falls back to BASEHOURS_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; falls back to BASEHOURS_LOG_DIR.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Correlation id recorded on audit entries; `basehours audit <ID>` reads them back.
    #[arg(long, global = true)]
    request_id: Option<String>,

    /// Where use-case audit entries go.
    #[arg(long, global = true, value_enum, default_value_t = AuditMode::Sqlite)]
    audit: AuditMode,

    #[command(subcommand)]
    entity: Entity,
}

#[derive(Debug, Subcommand)]
enum Entity {
    /// Client use cases.
    #[command(subcommand)]
    Clients(ClientCommand),
    /// Project use cases.
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// Stored audit entries for one request, oldest first.
    Audit { request_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AuditMode {
    /// `audit_logs` table in the same database.
    Sqlite,
    /// Diagnostic log, target `audit`.
    Log,
    Off,
}

#[derive(Debug, Subcommand)]
enum ClientCommand {
    List,
    Get { id: String },
    Search { name: String },
    Create { name: String },
    Rename { id: Uuid, name: String },
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    List,
    Get { id: String },
    Search { name: String },
    Create {
        #[arg(long)]
        client: Uuid,
        name: String,
    },
    Rename { id: Uuid, name: String },
    Delete { id: Uuid },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;
    init_logging_from_config(&config).context("failed to initialize logging")?;

    let conn = open_configured(&config).context("failed to open database")?;
    let ctx = match cli.request_id {
        Some(id) => RequestContext::with_request_id(id),
        None => RequestContext::new(),
    };
    debug!(
        "event=cli_run module=cli status=start request_id={}",
        ctx.request_id()
    );

    execute(cli.entity, &conn, &ctx, cli.audit)
}

fn execute(
    entity: Entity,
    conn: &Connection,
    ctx: &RequestContext,
    mode: AuditMode,
) -> Result<ExitCode> {
    match entity {
        Entity::Clients(command) => {
            let service = ClientService::new(
                SqliteClientRepository::try_new(conn)?,
                CliAuditSink::open(mode, conn)?,
            );
            match command {
                ClientCommand::List => emit(&service.get_all(ctx)),
                ClientCommand::Get { id } => emit(&service.get_by_id(ctx, &id)),
                ClientCommand::Search { name } => emit(&service.search_by_name(ctx, &name)),
                ClientCommand::Create { name } => {
                    emit(&service.create(ctx, &ClientRequest { name }))
                }
                ClientCommand::Rename { id, name } => {
                    emit(&service.update(ctx, &ClientUpdateRequest { id, name }))
                }
                ClientCommand::Delete { id } => emit(&service.delete(ctx, id)),
            }
        }
        Entity::Projects(command) => {
            let service = ProjectService::new(
                SqliteProjectRepository::try_new(conn)?,
                SqliteClientRepository::try_new(conn)?,
                CliAuditSink::open(mode, conn)?,
            );
            match command {
                ProjectCommand::List => emit(&service.get_all(ctx)),
                ProjectCommand::Get { id } => emit(&service.get_by_id(ctx, &id)),
                ProjectCommand::Search { name } => emit(&service.search_by_name(ctx, &name)),
                ProjectCommand::Create { client, name } => emit(&service.create(
                    ctx,
                    &ProjectRequest {
                        client_id: client,
                        name,
                    },
                )),
                ProjectCommand::Rename { id, name } => {
                    emit(&service.update(ctx, &ProjectUpdateRequest { id, name }))
                }
                ProjectCommand::Delete { id } => emit(&service.delete(ctx, id)),
            }
        }
        Entity::Audit { request_id } => {
            let records = SqliteAuditSink::try_new(conn)?.entries_for_request(&request_id)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sink selected by `--audit`.
enum CliAuditSink<'conn> {
    Sqlite(SqliteAuditSink<'conn>),
    Log(LogAuditSink),
    Off(NoopAuditSink),
}

impl<'conn> CliAuditSink<'conn> {
    fn open(mode: AuditMode, conn: &'conn Connection) -> Result<Self> {
        Ok(match mode {
            AuditMode::Sqlite => Self::Sqlite(SqliteAuditSink::try_new(conn)?),
            AuditMode::Log => Self::Log(LogAuditSink),
            AuditMode::Off => Self::Off(NoopAuditSink),
        })
    }
}

impl AuditSink for CliAuditSink<'_> {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        match self {
            Self::Sqlite(sink) => sink.record(entry),
            Self::Log(sink) => sink.record(entry),
            Self::Off(sink) => sink.record(entry),
        }
    }
}

/// Environment first, then command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::from_env().context("invalid BASEHOURS_* environment")?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir)?;
    }
    if config.db_path.is_none() {
        config = config.with_db_path(DEFAULT_DB_FILE);
    }
    Ok(config)
}

const DEFAULT_DB_FILE: &str = "basehours.sqlite3";

fn emit<T: Serialize>(response: &ServiceResponse<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(exit_code(response.kind))
}

fn exit_code(kind: OutcomeKind) -> ExitCode {
    match kind {
        OutcomeKind::Success | OutcomeKind::Created | OutcomeKind::Updated | OutcomeKind::Deleted => {
            ExitCode::SUCCESS
        }
        OutcomeKind::NotFound | OutcomeKind::ValidationError => ExitCode::from(1),
        OutcomeKind::Error => ExitCode::from(2),
    }
}
