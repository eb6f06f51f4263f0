//! Error types for the DataBrief client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole DataBrief client.
///
/// The taxonomy mirrors how failures are shown to the user: transport
/// failures, service-reported errors, and local precondition violations
/// are each surfaced exactly once and never retried.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BriefError {
    /// The analysis service was unreachable or answered with an
    /// unexpected shape or status.
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// A well-formed `{"error": ...}` payload from the service. The
    /// message is shown to the user verbatim.
    #[error("{0}")]
    Service(String),

    /// The user attempted an action without the required state
    /// (empty history on report compile, no chart to capture,
    /// dictation on an unsupported platform, ...).
    #[error("{0}")]
    Precondition(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (attachment reading, export writing)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BriefError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a service-reported error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Check if this is a precondition violation
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// The message to show the user. Service and precondition errors
    /// carry user-facing text as-is; the rest go through `Display`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service(msg) | Self::Precondition(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for BriefError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BriefError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BriefError>`.
pub type Result<T> = std::result::Result<T, BriefError>;
