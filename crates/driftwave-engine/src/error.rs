//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while rendering or persisting a track.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Key name not found in the enharmonic pitch table.
    #[error("unknown key: {key}")]
    UnknownKey {
        /// The key name that failed to resolve.
        key: String,
    },

    /// A render parameter outside its valid domain.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error while writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External encoder was found but failed to produce output.
    ///
    /// Callers treat this as a warning: the uncompressed artifact is still
    /// a successful result.
    #[error("encoder failed: {message}")]
    Encode {
        /// Error message.
        message: String,
    },
}

impl EngineError {
    /// Creates an unknown key error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an encoder error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_display() {
        let err = EngineError::unknown_key("H");
        assert_eq!(err.to_string(), "unknown key: H");
    }

    #[test]
    fn test_invalid_param_helper() {
        let err = EngineError::invalid_param("duration", "must be positive");
        assert!(err.to_string().contains("duration"));
        assert!(err.to_string().contains("must be positive"));
    }
}
