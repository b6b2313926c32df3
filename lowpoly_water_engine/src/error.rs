//! Error types for the lowpoly water engine
//!
//! This module defines the error types used throughout the engine,
//! covering backend failures, resource validation, and initialization.

use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (attachment, framebuffer, mesh, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, context, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`enum@Error`], logging it first through the engine logger.
///
/// Evaluates to `Error::InvalidResource` with the formatted message.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("lowpoly::Fbo", "unknown color slot {}", slot));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        $crate::engine_error!($source, $($arg)*);
        $crate::lowpoly::Error::InvalidResource(format!($($arg)*))
    }};
}

/// Log an error and return it from the enclosing function.
///
/// # Example
///
/// ```ignore
/// if slot >= MAX_COLOUR_SLOTS {
///     engine_bail!("lowpoly::Fbo", "color slot {} out of range", slot);
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
