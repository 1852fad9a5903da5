use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::model::config::LogConfig;

/// Where log events may go for the current run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The terminal belongs to the UI: file only, or nothing
    Tui,
    /// stderr, plus the file when one is configured
    Cli,
}

/// Build the event filter: `RUST_LOG` wins over the configured level
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. `file_override` (the `--log` flag) takes
/// precedence over `[log] file`.
pub fn init_logging(
    config: &LogConfig,
    target: LogTarget,
    file_override: Option<&Path>,
) -> Result<(), std::io::Error> {
    let file_path = file_override.or(config.file.as_deref());
    let filter = env_filter(&config.level);

    let file = match file_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Some(OpenOptions::new().create(true).append(true).open(path)?)
        }
        None => None,
    };

    // A second init (tests, repeated runs in one process) is not an error.
    let _ = match (target, file) {
        (LogTarget::Tui, None) => return Ok(()),
        (LogTarget::Tui, Some(file)) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .try_init(),
        (LogTarget::Cli, Some(file)) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .try_init(),
        (LogTarget::Cli, None) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tui_without_file_installs_nothing() {
        let config = LogConfig::default();
        assert!(init_logging(&config, LogTarget::Tui, None).is_ok());
    }

    #[test]
    fn creates_log_file_and_parent_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("logs").join("docket.log");
        let config = LogConfig {
            level: "debug".into(),
            file: Some(path.clone()),
        };
        init_logging(&config, LogTarget::Tui, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn bad_level_falls_back() {
        // Must not panic on an unparsable directive
        let _ = env_filter("not a [valid directive");
    }
}
