//! Error types shared by the engine and its host collaborators
//!
//! Host lookups report failures through `HostError`. The engine never
//! surfaces those to callers: a failed lookup is logged and the branch it
//! belonged to is treated as absent. `NotifierError` is reserved for caller
//! contract violations at the adapter entry points.

use thiserror::Error;

/// Failure reported by a host collaborator (repository, rendering source,
/// workflow provider, ...).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Lookup failed for '{target}': {message}")]
    Lookup { target: String, message: String },
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("Corrupt data in '{target}': {message}")]
    Corrupt { target: String, message: String },
}

impl HostError {
    pub fn lookup(target: impl Into<String>, message: impl Into<String>) -> Self {
        HostError::Lookup {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Contract violations raised by the adapter entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifierError {
    #[error("{surface} was invoked without a context item")]
    MissingContextItem { surface: &'static str },
}
