//! `tracing` setup shared by every Waxwing binary and test harness.
//!
//! [`init_logging`] installs a daily-rolling file sink and, optionally, a
//! mirror layer on stderr. The first caller wins; later calls are no-ops
//! that return the already-resolved log file path, which lets integration
//! tests share one subscriber without coordinating.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

const LOG_DIR_ENV: &str = "WAXWING_LOG_DIR";

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component; doubles as the log file prefix.
    pub app_name: &'static str,
    /// Explicit log directory. When unset, `WAXWING_LOG_DIR` is consulted,
    /// then `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Mirror events to stderr in addition to the file sink.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "waxwing",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info",
        }
    }
}

fn fmt_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(ansi).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}

/// Install the global subscriber and return the active log file path.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let prefix = format!("{}.log", config.app_name);
    // The daily roller names files `<prefix>.<date>` inside the directory.
    let file_path = dir.join(format!("{prefix}.{}", Local::now().format("%Y-%m-%d")));

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, prefix));
    let _ = LOG_GUARD.set(guard);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(fmt_layer(config.format, writer, false));
    if config.emit_stderr {
        layers.push(fmt_layer(config.format, std::io::stderr, true));
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(file_path.clone());
    Ok(file_path)
}

/// Explicit directory, then the env override, then the per-user data dir.
fn log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(LOG_DIR_ENV).ok().map(PathBuf::from))
        .map(|dir| expand_home(&dir))
        .unwrap_or_else(|| data_dir(app_name))
}

fn expand_home(path: &Path) -> PathBuf {
    match (
        path.to_str().and_then(|s| s.strip_prefix("~/")),
        std::env::var("HOME"),
    ) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

fn data_dir(app_name: &str) -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name),
        Err(_) => PathBuf::from(".").join(app_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins_over_defaults() {
        let dir = log_dir("waxwing", Some(Path::new("/var/log/waxwing")));
        assert_eq!(dir, PathBuf::from("/var/log/waxwing"));
    }

    #[test]
    fn tilde_prefix_expands_against_home() {
        match std::env::var("HOME") {
            Ok(home) => assert_eq!(
                expand_home(Path::new("~/logs")),
                PathBuf::from(home).join("logs")
            ),
            Err(_) => assert_eq!(expand_home(Path::new("~/logs")), PathBuf::from("~/logs")),
        }
    }

    #[test]
    fn data_dir_is_scoped_to_the_app_name() {
        let dir = data_dir("waxwing-tests");
        assert!(dir.ends_with("waxwing-tests"));
    }
}
