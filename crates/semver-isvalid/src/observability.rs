//! Observability setup: structured logging.
//!
//! **Important**: This module never writes to stdout, which is reserved for
//! the validation report. Logs go to a JSONL file when a log location is
//! configured, and to stderr otherwise.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const ENV_LOG_PATH: &str = "SEMVER_ISVALID_LOG_PATH";
const ENV_LOG_DIR: &str = "SEMVER_ISVALID_LOG_DIR";
const LOG_FILE_SUFFIX: &str = ".jsonl";

/// Configuration for observability setup.
#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// The service name used for the default log file name.
    pub service: String,
    /// Directory for JSONL log files from the config file, if any.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Create config from the package name with an optional log directory.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME").to_string(),
            log_dir,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct LogTarget {
    dir: PathBuf,
    file_name: String,
}

/// Guard that must be held for the lifetime of the application so buffered
/// file logs are flushed on exit.
pub struct ObservabilityGuard {
    _log_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// Returns a guard that must be held for the application lifetime.
///
/// # Errors
///
/// Returns an error if an explicitly requested log location is not writable
/// or a global subscriber is already installed.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    env_filter: EnvFilter,
) -> Result<ObservabilityGuard> {
    let target = resolve_log_target(&cfg.service, cfg.log_dir.as_deref())?;

    let guard = match target {
        Some(target) => {
            let (writer, guard) = file_writer(&target);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(writer))
                .try_init()
                .context("failed to install file logger")?;
            tracing::debug!(dir = %target.dir.display(), file = %target.file_name, "logging to file");
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_ansi(std::io::stderr().is_terminal())
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("failed to install stderr logger")?;
            None
        }
    };

    Ok(ObservabilityGuard { _log_guard: guard })
}

/// Build an `EnvFilter` based on CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > RUST_LOG env > default_level
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    if verbose > 0 {
        let level = match verbose {
            1 => "debug",
            _ => "trace",
        };
        return EnvFilter::new(level);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn file_writer(target: &LogTarget) -> (NonBlocking, WorkerGuard) {
    let appender = tracing_appender::rolling::never(&target.dir, &target.file_name);
    tracing_appender::non_blocking(appender)
}

fn resolve_log_target(service: &str, config_log_dir: Option<&Path>) -> Result<Option<LogTarget>> {
    let path_override = std::env::var_os(ENV_LOG_PATH).map(PathBuf::from);
    let dir_override = std::env::var_os(ENV_LOG_DIR).map(PathBuf::from);

    resolve_log_target_with(
        service,
        path_override,
        dir_override,
        config_log_dir.map(PathBuf::from),
    )
}

/// `None` means no file logging was asked for.
fn resolve_log_target_with(
    service: &str,
    path_override: Option<PathBuf>,
    dir_override: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Result<Option<LogTarget>> {
    if let Some(path) = path_override {
        return log_target_from_path(path).map(Some);
    }

    match dir_override.or(config_dir) {
        Some(dir) => log_target_from_dir(dir, service).map(Some),
        None => Ok(None),
    }
}

fn log_target_from_dir(dir: PathBuf, service: &str) -> Result<LogTarget> {
    let file_name = format!("{service}{LOG_FILE_SUFFIX}");
    ensure_writable(&dir, &file_name)?;
    Ok(LogTarget { dir, file_name })
}

fn log_target_from_path(path: PathBuf) -> Result<LogTarget> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("{ENV_LOG_PATH} must end in a UTF-8 file name"))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_writable(&dir, &file_name)?;

    Ok(LogTarget { dir, file_name })
}

fn ensure_writable(dir: &Path, file_name: &str) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let path = dir.join(file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_filter_quiet_overrides() {
        let filter = env_filter(true, 2, "info");
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn env_filter_verbose_maps_to_debug_and_trace() {
        assert_eq!(env_filter(false, 1, "warn").to_string(), "debug");
        assert_eq!(env_filter(false, 2, "warn").to_string(), "trace");
    }

    #[test]
    fn no_overrides_means_no_file_target() {
        let target = resolve_log_target_with("demo", None, None, None).unwrap();
        assert!(target.is_none());
    }

    #[test]
    fn path_override_wins() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("override.jsonl");

        let target = resolve_log_target_with(
            "demo",
            Some(file_path),
            Some(tmp.path().join("ignored")),
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(target.dir, tmp.path());
        assert_eq!(target.file_name, "override.jsonl");
    }

    #[test]
    fn dir_override_beats_config_dir() {
        let tmp = TempDir::new().unwrap();
        let env_dir = tmp.path().join("env");
        let config_dir = tmp.path().join("config");

        let target = resolve_log_target_with("demo", None, Some(env_dir.clone()), Some(config_dir))
            .unwrap()
            .unwrap();

        assert_eq!(
            target,
            LogTarget {
                dir: env_dir,
                file_name: format!("demo{LOG_FILE_SUFFIX}"),
            }
        );
    }

    #[test]
    fn config_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join("nested").join("logs");

        let target = resolve_log_target_with("demo", None, None, Some(config_dir.clone()))
            .unwrap()
            .unwrap();

        assert_eq!(target.dir, config_dir);
        assert!(config_dir.join("demo.jsonl").is_file());
    }
}
