/// Magnum Engine - process-wide facade for the scene graph runtime configuration
///
/// Holds the installed logger and the minimum severity below which log
/// entries are dropped before reaching the logger. Both live in thread-safe
/// static storage behind a RwLock.

use std::sync::{OnceLock, RwLock};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Global runtime configuration
static CONFIG: OnceLock<RwLock<EngineConfig>> = OnceLock::new();

/// Runtime knobs shared by every scene graph in the process
#[derive(Debug, Clone, Copy)]
struct EngineConfig {
    /// Entries strictly below this severity are discarded
    min_severity: LogSeverity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_severity: LogSeverity::Info,
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn config() -> &'static RwLock<EngineConfig> {
    CONFIG.get_or_init(|| RwLock::new(EngineConfig::default()))
}

// ===== PUBLIC API =====

/// Engine facade
///
/// Every scene graph operation reports through the logger installed here.
///
/// # Example
///
/// ```no_run
/// use magnum_scene_graph::magnum::{Engine, log::LogSeverity};
///
/// // Show the per-object trace output
/// Engine::set_min_severity(LogSeverity::Trace);
/// assert_eq!(Engine::min_severity(), LogSeverity::Trace);
/// ```
pub struct Engine;

impl Engine {
    // ===== CONFIGURATION API =====

    /// Set the minimum severity forwarded to the logger
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = config().write() {
            lock.min_severity = severity;
        }
    }

    /// Current minimum severity (Info unless changed)
    pub fn min_severity() -> LogSeverity {
        config()
            .read()
            .map(|lock| lock.min_severity)
            .unwrap_or(LogSeverity::Info)
    }

    /// Whether an entry of the given severity would reach the logger
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity >= Self::min_severity()
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// capture logger in tests, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use magnum_scene_graph::magnum::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger) and the severity filter to Info
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_min_severity(LogSeverity::Info);
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_trace!, engine_debug!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::new(severity, source, message));
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and, through it, engine_err!/engine_bail!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry::detailed(severity, source, message, file, line));
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
