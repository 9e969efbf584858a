//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit stable, metadata-only diagnostic events from core.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and directory.
//! - Logging initialization must not panic.
//! - Re-initialization with a different level or directory is rejected.
//! - Warnings and errors are also copied to stderr for CLI callers.

use crate::config::CoreConfig;
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "basehours";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidDirectory(String),
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `flexi_logger` refused the specification or failed to start.
    Backend(String),
    /// Logging is already active with a different setting.
    Reconfigure {
        setting: &'static str,
        active: String,
        requested: String,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory(message) => write!(f, "{message}"),
            Self::CreateDirectory { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Reconfigure {
                setting,
                active,
                requested,
            } => write!(
                f,
                "logging already initialized with {setting} `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Initializes core logging with level and directory.
///
/// # Errors
/// - `level` is unsupported.
/// - `log_dir` is empty, non-absolute, or cannot be created.
/// - The logger backend fails to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let normalized_level = normalize_level(level)?;
    let normalized_dir = normalize_log_dir(log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(normalized_level, &normalized_dir))?;

    if state.log_dir != normalized_dir {
        return Err(LoggingError::Reconfigure {
            setting: "directory",
            active: state.log_dir.display().to_string(),
            requested: normalized_dir.display().to_string(),
        });
    }
    if state.level != normalized_level {
        return Err(LoggingError::Reconfigure {
            setting: "level",
            active: state.level.to_string(),
            requested: normalized_level.to_string(),
        });
    }

    Ok(())
}

/// Initializes logging from resolved configuration.
///
/// Returns `Ok(false)` without touching the logger when no `log_dir` is set.
pub fn init_logging_from_config(config: &CoreConfig) -> Result<bool, LoggingError> {
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidDirectory(
            "log_dir cannot be empty".to_string(),
        ));
    }
    if !log_dir.is_absolute() {
        return Err(LoggingError::InvalidDirectory(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        )));
    }
    Ok(log_dir.to_path_buf())
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDirectory {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} build_mode={} version={}",
        std::env::consts::OS,
        build_mode(),
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=core_init module=core status=ok level={} log_dir={}",
        level,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Panic payloads may echo client or project names; cap and flatten.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens line breaks and truncates `value` to `max_chars` characters.
pub(crate) fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, init_logging_from_config, logging_status, normalize_level,
        normalize_log_dir, sanitize_message, LoggingError,
    };
    use crate::config::CoreConfig;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "basehours-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(matches!(
            normalize_level("verbose"),
            Err(LoggingError::InvalidLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn normalize_log_dir_rejects_relative_and_empty_paths() {
        let error = normalize_log_dir(Path::new("logs/dev")).unwrap_err();
        assert!(error.to_string().contains("absolute"));
        assert!(normalize_log_dir(Path::new("")).is_err());
    }

    #[test]
    fn sanitize_message_removes_newlines_and_truncates() {
        let sanitized = sanitize_message("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn config_without_log_dir_skips_init() {
        assert!(!init_logging_from_config(&CoreConfig::default()).unwrap());
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = unique_temp_dir("idempotent");
        let second_dir = unique_temp_dir("different");

        init_logging("info", &log_dir).expect("first init should succeed");
        init_logging("INFO", &log_dir).expect("same config should be idempotent");

        let level_error = init_logging("debug", &log_dir).unwrap_err();
        assert!(matches!(
            level_error,
            LoggingError::Reconfigure { setting: "level", .. }
        ));

        let dir_error = init_logging("info", &second_dir).unwrap_err();
        assert!(dir_error.to_string().contains("refusing to switch"));

        let (active_level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, log_dir);
    }
}
