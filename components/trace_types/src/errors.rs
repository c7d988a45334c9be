//! Error types for MarkScope tracing

use thiserror::Error;

/// Errors that can occur while setting up tracing domains or frame profiling
///
/// None of these are raised by the non-strict constructors: they log a
/// warning and degrade to a no-op instead. Only the `try_*` constructors
/// surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A generated signpost id was `OS_SIGNPOST_ID_NULL` or `OS_SIGNPOST_ID_INVALID`
    #[error("Invalid signpost id: {0:#x}")]
    InvalidSignpostId(u64),

    /// A backend could not create a domain
    #[error("Backend '{backend}' failed to create domain: {reason}")]
    DomainCreation {
        /// Backend name
        backend: String,
        /// Human readable cause
        reason: String,
    },

    /// The first root object is missing or is not a render surface
    #[error("No render surface available")]
    NoRenderSurface,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TraceError {
    /// Create a domain creation error
    pub fn domain_creation(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DomainCreation {
            backend: backend.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for MarkScope operations
pub type Result<T> = std::result::Result<T, TraceError>;
