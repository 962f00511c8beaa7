//! Thin logging facade over the tracing pipeline.
use std::path::{Path, PathBuf};

use super::utils::log_file_path;

/// Structured logger for command output.
///
/// All messages are emitted as [`tracing`] events; the console and file
/// layers installed by [`init_subscriber`](super::init_subscriber) take care
/// of formatting. Debug messages are suppressed on the console unless the
/// verbose flag was given, but always reach the log file.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for the given command.
    ///
    /// Stores the log file path for later display; the file itself is
    /// created and written by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "boxup::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_new_resolves_log_path() {
        let log = Logger::new("test");
        if let Some(path) = log.log_path() {
            assert!(path.to_string_lossy().ends_with("test.log"));
        }
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        let log = Logger::new("test");
        log.error("error");
        log.warn("warn");
        log.stage("stage");
        log.info("info");
        log.debug("debug");
    }
}
