//! Error types for the mailsink crate.
//!
//! Only the settings collaborators have failure paths worth typing; the
//! interception hooks and existence queries swallow these (logging at WARN)
//! so the host's send pipeline never sees them.

use std::io;

use thiserror::Error;

/// Failures surfaced by a settings backend.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O operation failed (file-backed store read/write/rename).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (lock poisoning, etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specialized `Result` type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// Convenience conversion for lock poisoning
impl<T> From<std::sync::PoisonError<T>> for SettingsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        Self::Internal(format!("Lock poisoned: {e}"))
    }
}
