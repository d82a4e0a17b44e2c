//! File logging for the terminal front-end.
//!
//! Output goes to a daily rolling file under the XDG state directory and
//! never to the terminal, which the TUI owns.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use anyhow::{anyhow, Context};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_PREFIX: &str = "wavebar.log";
const KEEP_LOG_FILES: usize = 7;

static APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = log_dir()?;

    if let Err(e) = prune_logs(&log_dir) {
        eprintln!("wavebar: could not prune old logs: {e:#}");
    }

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&log_dir, LOG_PREFIX));
    APPENDER_GUARD
        .set(guard)
        .map_err(|_| anyhow!("logging already initialized"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::debug!("Logging to {}", log_dir.display());
    Ok(())
}

fn log_dir() -> anyhow::Result<PathBuf> {
    let dir = match std::env::var_os("XDG_STATE_HOME") {
        Some(state) => PathBuf::from(state).join("wavebar"),
        None => dirs::home_dir()
            .ok_or_else(|| anyhow!("could not determine home directory"))?
            .join(".local/state/wavebar"),
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

/// Rotated files look like `wavebar.log.YYYY-MM-DD`.
fn is_rotated_log(name: &str) -> bool {
    name.strip_prefix(LOG_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| date.matches('-').count() == 2)
}

/// Paths to delete so only the `keep` newest remain.
fn stale_logs(mut files: Vec<(PathBuf, SystemTime)>, keep: usize) -> Vec<PathBuf> {
    files.sort_by(|a, b| b.1.cmp(&a.1));
    files.into_iter().skip(keep).map(|(path, _)| path).collect()
}

fn prune_logs(dir: &Path) -> anyhow::Result<()> {
    let files = fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !is_rotated_log(&path.file_name()?.to_string_lossy()) {
                return None;
            }
            let modified = fs::metadata(&path).ok()?.modified().ok()?;
            Some((path, modified))
        })
        .collect();

    for path in stale_logs(files, KEEP_LOG_FILES) {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to delete {}: {e}", path.display());
        }
    }
    Ok(())
}
