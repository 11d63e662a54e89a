//! Error types for the DDNS client
//!
//! The runtime error set is deliberately closed: everything that can go wrong
//! inside a poll cycle is either a transport failure or a decode failure.
//! Configuration errors only surface at startup.

use thiserror::Error;

/// Boxed underlying cause carried by runtime errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS client
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be completed, or the remote side rejected it
    #[error("Transport error ({context}): {source}")]
    Transport {
        /// What was being attempted
        context: String,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// The response did not have the expected structure
    #[error("Decode error ({context}): {source}")]
    Decode {
        /// What was being decoded
        context: String,
        /// Underlying cause
        #[source]
        source: BoxError,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create a decode error
    pub fn decode(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Whether this is a decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode("json", err)
    }
}
