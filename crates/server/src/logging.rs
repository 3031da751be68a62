// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tracing setup.
//!
//! Events go to the console and to two daily-rotated JSON files under the
//! log directory: `error/error.<date>.log` with errors only, and
//! `info/combined.<date>.log` with everything `RUST_LOG` admits.

use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LogFormat;

/// Rotated files kept per log before the oldest is removed.
pub const RETAINED_LOG_FILES: usize = 20;

/// Flushes the file writers when dropped; hold it for the life of the process.
#[must_use = "dropping the guards stops file logging"]
pub struct LogGuards {
    _error: WorkerGuard,
    _combined: WorkerGuard,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// A file appender rotating at midnight UTC, named `<prefix>.<date>.log`.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or the file cannot be opened.
pub fn daily_appender(dir: &Path, prefix: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(RETAINED_LOG_FILES)
        .build(dir)
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if either log file cannot be opened.
pub fn init_tracing(format: LogFormat, log_dir: &Path) -> Result<LogGuards, InitError> {
    let (error_writer, error_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(daily_appender(&log_dir.join("error"), "error")?);
    let (combined_writer, combined_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(daily_appender(&log_dir.join("info"), "combined")?);

    let console: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Pretty => fmt::layer().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(console.with_filter(env_filter()))
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(error_writer)
                .with_filter(LevelFilter::ERROR),
        )
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(combined_writer)
                .with_filter(env_filter()),
        )
        .init();

    Ok(LogGuards {
        _error: error_guard,
        _combined: combined_guard,
    })
}
