//! Error types for YAML parsing.

use thiserror::Error;

/// Result type alias for confcheck-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning YAML text into a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// A mapping repeats one of its keys
    #[error("Duplicate key '{key}' on line {line}")]
    DuplicateKey { key: String, line: usize },

    /// A scalar carries a core tag its text does not satisfy, e.g. `!!int abc`
    #[error("Invalid !!{tag} value '{value}' on line {line}")]
    InvalidTaggedValue {
        tag: String,
        value: String,
        line: usize,
    },

    /// The event stream did not describe a well-formed tree
    #[error("Invalid YAML structure: {message}")]
    InvalidStructure { message: String },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::ParseError {
            message: err.to_string(),
        }
    }
}
