// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console output always; with the `file-logging` feature and a configured
//! `log_dir`, a JSON log is also written to a timestamped run folder:
//! ```text
//! <log_dir>/
//!   └── run_20250101_120000/
//!       └── synaptome.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use synaptome_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps background log writers alive; logs are flushed when dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the filter for the configured base level plus per-crate debug flags
///
/// # Errors
/// Fails when the level or a crate name does not form a valid directive.
pub fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(config.level.trim());
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

/// Install the global subscriber
///
/// # Errors
/// Fails on an invalid filter, when the run folder cannot be created, or when
/// a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_filter = build_filter(config, debug_flags)?;
    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(console_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let guard = match &config.log_dir {
        Some(base_dir) => {
            let run_folder = create_run_folder(base_dir)?;
            let appender = tracing_appender::rolling::never(&run_folder, "synaptome.log");
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(build_filter(config, debug_flags)?)
                    .boxed(),
            );
            LoggingGuard {
                _file_guard: Some(file_guard),
                log_dir: Some(run_folder),
            }
        }
        None => LoggingGuard {
            _file_guard: None,
            log_dir: None,
        },
    };

    #[cfg(not(feature = "file-logging"))]
    let guard = LoggingGuard { log_dir: None };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    if cfg!(not(feature = "file-logging")) && config.log_dir.is_some() {
        tracing::warn!(
            target: "synaptome",
            "logging.log_dir is set but file-logging is disabled; logging to console only"
        );
    }

    Ok(guard)
}

#[cfg(feature = "file-logging")]
fn create_run_folder(base_dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}
