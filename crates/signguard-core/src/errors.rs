//! Unified error system for SignGuard core
//!
//! A single error type for faults that are not safety rejections. Consensus
//! lock violations and canonical decode failures have their own taxonomy in
//! `signguard-consensus`; everything else funnels through [`SignGuardError`].

use serde::{Deserialize, Serialize};

/// Unified error type for non-safety SignGuard faults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SignGuardError {
    /// Invalid input (out-of-range step, wrong-length identifier, broken invariant)
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl SignGuardError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Standard Result type for SignGuard operations
pub type Result<T> = std::result::Result<T, SignGuardError>;

impl From<std::io::Error> for SignGuardError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err.to_string())
    }
}
