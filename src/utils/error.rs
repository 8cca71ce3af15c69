//! Error handling for xl2tex conversions
//!
//! The rewriting pipeline itself never fails: malformed brackets and
//! unsupported call shapes fall back to literal text. The errors here cover
//! the places where a caller asked to be told instead, plus the I/O and
//! configuration plumbing of the CLI.

use thiserror::Error;

/// Conversion error type
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// The rewritten formula still calls a function with no LaTeX form
    #[error("Unsupported function '{name}'")]
    UnsupportedFunction { name: String },
    /// Options could not be read or are inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        ConversionError::UnsupportedFunction { name: name.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::InvalidConfig {
            message: message.into(),
        }
    }
}
