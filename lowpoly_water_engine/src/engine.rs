/// Engine - singleton manager for engine-wide services
///
/// This module provides global singleton management for the logger and the
/// engine lifecycle. It uses thread-safe static storage with RwLock for safe
/// concurrent access.
///
/// Graphics contexts are deliberately NOT stored here: a GL context is
/// thread-affine and is owned directly by the render thread that created it.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// ===== INTERNAL STATE =====

/// Tracks whether the engine has been initialized
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the engine lifecycle and the global logger used by the
/// `engine_*!` logging macros.
///
/// # Example
///
/// ```no_run
/// use lowpoly_water_engine::lowpoly::Engine;
///
/// Engine::initialize()?;
/// // ... create a graphics context, render frames ...
/// Engine::shutdown();
/// # Ok::<(), lowpoly_water_engine::lowpoly::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize the engine
    ///
    /// This must be called once at application startup before creating any
    /// graphics context or render engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is already initialized.
    pub fn initialize() -> Result<()> {
        if INITIALIZED.swap(true, Ordering::SeqCst) {
            let err = Error::InitializationFailed(
                "Engine already initialized. Call Engine::shutdown() first.".to_string(),
            );
            crate::engine_error!("lowpoly::Engine", "{}", err);
            return Err(err);
        }
        crate::engine_info!("lowpoly::Engine", "Engine initialized");
        Ok(())
    }

    /// Shutdown the engine
    ///
    /// This should be called at application shutdown, after every graphics
    /// resource has been released. After calling this, `initialize()` must
    /// be called again before the engine is used.
    pub fn shutdown() {
        if INITIALIZED.swap(false, Ordering::SeqCst) {
            crate::engine_info!("lowpoly::Engine", "Engine shut down");
        }
    }

    /// Whether `initialize()` has been called without a matching `shutdown()`
    pub fn is_initialized() -> bool {
        INITIALIZED.load(Ordering::SeqCst)
    }

    /// Reset the singleton state for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        INITIALIZED.store(false, Ordering::SeqCst);
        Self::reset_logger();
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// capturing logger for tests, etc.)
    ///
    /// # Arguments
    ///
    /// * `logger` - Any type implementing the Logger trait
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lowpoly_water_engine::lowpoly::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct QuietLogger;
    /// impl Logger for QuietLogger {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// Engine::set_logger(QuietLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "lowpoly::Engine")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! macro to include source location.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level (typically Error)
    /// * `source` - Source module (e.g., "lowpoly::Engine")
    /// * `message` - Log message
    /// * `file` - Source file path
    /// * `line` - Source line number
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
