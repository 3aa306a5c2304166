//! Application logging.
//!
//! [`Logger`] keeps an in-memory, timestamped buffer that the log dialog shows
//! and, when file logging is enabled, a log file in the data directory. Both
//! are fed through a `fern` dispatch installed as the `log` facade backend, so
//! `log::info!` and friends land in the same places as [`Logger::log`].

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Upper bound on buffered entries; the oldest are dropped first
const MAX_BUFFERED_ENTRIES: usize = 2000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// In-memory logger without a file
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            log_file: None,
        }
    }

    /// Logger for the `[logging] enabled` setting
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined or created.
    pub fn from_config(enabled: bool) -> Result<Self> {
        if enabled {
            Self::with_file(Self::get_log_file_path()?)
        } else {
            Ok(Self::new())
        }
    }

    /// Logger that also appends to `path`
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        Ok(Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            log_file: Some(path),
        })
    }

    /// Default log file location
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("fraudwatch").join("fraudwatch.log"))
    }

    /// Whether entries are also written to a log file
    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Add a log entry to the in-memory buffer
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        self.push(format!("[{}] {}", timestamp, message));
    }

    fn push(&self, entry: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_BUFFERED_ENTRIES {
                logs.pop_front();
            }
            logs.push_back(entry);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Build the dispatch feeding the buffer and, if enabled, the log file.
    ///
    /// HTTP client internals are capped at `warn` to keep the buffer readable.
    pub fn dispatch(&self, level: LevelFilter) -> Result<fern::Dispatch> {
        let buffer = self.clone();
        let memory = fern::Dispatch::new()
            .format(|out, message, record| out.finish(format_args!("{:<5} {}", record.level(), message)))
            .chain(fern::Output::call(move |record| {
                buffer.log(record.args().to_string());
            }));

        let mut dispatch = fern::Dispatch::new()
            .level(level)
            .level_for("hyper", LevelFilter::Warn)
            .level_for("hyper_util", LevelFilter::Warn)
            .level_for("reqwest", LevelFilter::Warn)
            .level_for("rustls", LevelFilter::Warn)
            .chain(memory);

        if let Some(path) = &self.log_file {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} [{}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        Ok(dispatch)
    }

    /// Install this logger as the global `log` backend
    ///
    /// # Errors
    /// Returns error if the log file cannot be opened or a logger is already set.
    pub fn install(&self, level: LevelFilter) -> Result<()> {
        self.dispatch(level)?
            .apply()
            .context("Failed to install logger")?;
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
