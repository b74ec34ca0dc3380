use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// File name of the JSON trace written next to the summary.
pub const TRACE_FILE: &str = "trace.jsonl";

/// Keeps the background writer alive; dropping it flushes the trace file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub trace_path: PathBuf,
}

/// Installs a JSON subscriber writing decision and game events to
/// `trace.jsonl` beside the summary. `RUST_LOG` overrides the configured
/// level. Returns `None` when structured logging is disabled.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let trace_dir = outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&trace_dir)
        .with_context(|| format!("creating trace directory at {}", trace_dir.display()))?;

    let trace_path = trace_dir.join(TRACE_FILE);
    let file = File::create(&trace_path)
        .with_context(|| format!("creating trace file at {}", trace_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed by the host or a test.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        trace_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn disabled_logging_installs_nothing() {
        let outputs = ResolvedOutputs {
            jsonl: PathBuf::from("unused/games.jsonl"),
            summary_md: PathBuf::from("unused/summary.md"),
        };
        let guard = init_logging(&LoggingConfig::default(), &outputs).expect("no-op");
        assert!(guard.is_none());
        assert!(!Path::new("unused").exists());
    }

    #[test]
    fn structured_logging_creates_trace_beside_summary() {
        let dir = tempdir().expect("temp dir");
        let outputs = ResolvedOutputs {
            jsonl: dir.path().join("games.jsonl"),
            summary_md: dir.path().join("nested").join("summary.md"),
        };
        let logging = LoggingConfig {
            enable_structured: true,
            tracing_level: "debug".to_string(),
        };
        let guard = init_logging(&logging, &outputs)
            .expect("logging initialised")
            .expect("guard returned");
        assert_eq!(guard.trace_path, dir.path().join("nested").join(TRACE_FILE));
        assert!(guard.trace_path.exists());
    }
}
