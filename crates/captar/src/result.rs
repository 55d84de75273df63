//! Result and error types for Captar.
//!
//! The analysis core (decomposition, classification, estimation, descriptor
//! synthesis) is total over its input domain and never produces an error;
//! callers judge trust through the `confidence` field instead. The error
//! channel exists only at the export boundary.

use thiserror::Error;

/// Result type for Captar operations
pub type CaptarResult<T> = Result<T, CaptarError>;

/// Errors that can occur at the Captar boundary
#[derive(Debug, Error)]
pub enum CaptarError {
    /// Serialization of a descriptor or manifest failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A generated component identifier was empty after sanitization
    #[error("Cannot derive a component identifier from key {key:?}")]
    InvalidIdentifier {
        /// Element key the identifier was derived from
        key: String,
    },
}
