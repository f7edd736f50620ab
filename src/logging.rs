//! Tracing setup.
//!
//! The desktop form logs to stdout and to one file per launch under `logs/`;
//! only the newest launches are kept. The headless predictor logs to stderr.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use thiserror::Error;
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Launch logs kept after pruning.
const KEEP_LAUNCHES: usize = 10;
const LAUNCH_PREFIX: &str = "churnsight_";
const LAUNCH_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dirs(#[from] AppDirError),
    #[error("Failed to name the launch log: {0}")]
    Stamp(#[from] time::error::Format),
    #[error("Failed to open the launch log: {0}")]
    Appender(#[from] InitError),
    #[error("Failed to prune old logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install the tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Log to stdout and a fresh file for this launch, at `info` unless `RUST_LOG` says otherwise.
///
/// Later calls are no-ops. Callers decide whether a failure is fatal.
pub fn init() -> Result<(), LoggingError> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    let dir = app_dirs::logs_dir()?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(launch_stem(now)?)
        .filename_suffix("log")
        .build(&dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    prune_launches(&dir, KEEP_LAUNCHES)?;

    let subscriber = Registry::default()
        .with(env_filter("info"))
        .with(
            fmt::layer()
                .with_timer(line_timer())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(line_timer())
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = FILE_GUARD.set(guard);

    tracing::info!("Logging to {}", dir.display());
    Ok(())
}

/// Log to stderr only, at `warn` unless `RUST_LOG` says otherwise.
pub fn init_console() -> Result<(), LoggingError> {
    let subscriber = Registry::default().with(env_filter("warn")).with(
        fmt::layer()
            .with_timer(line_timer())
            .with_writer(std::io::stderr),
    );
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn launch_stem(now: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("{LAUNCH_PREFIX}{}", now.format(LAUNCH_STAMP)?))
}

fn is_launch_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LAUNCH_PREFIX) && name.ends_with(".log"))
}

/// Delete all but the `keep` newest launch logs. Launch stamps sort chronologically by name.
fn prune_launches(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_error = |source: std::io::Error| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launches: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(prune_error)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_launch_log(path))
        .collect();
    launches.sort();
    let excess = launches.len().saturating_sub(keep);
    for path in launches.drain(..excess) {
        fs::remove_file(&path).map_err(prune_error)?;
    }
    Ok(())
}

fn line_timer() -> fmt::time::OffsetTime<BorrowedFormatItem<'static>> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_STAMP.into())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
