//! Error types and result definitions shared by the domain, service and CLI layers.

use thiserror::Error;

/// Result type for attribute table operations
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Error kinds surfaced by attribute table construction, export and tooling
#[derive(Error, Debug, miette::Diagnostic)]
pub enum AttributeError {
    #[error("ASN.1 encoding/decoding error: {0}")]
    Asn1Error(String),

    #[error("Invalid attribute entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<der::Error> for AttributeError {
    fn from(error: der::Error) -> Self {
        AttributeError::Asn1Error(error.to_string())
    }
}

impl From<std::io::Error> for AttributeError {
    fn from(error: std::io::Error) -> Self {
        AttributeError::IoError(error.to_string())
    }
}
