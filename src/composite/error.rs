use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read composite file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Composite header is not terminated by ETX")]
    MissingEtx,

    #[error("Composite header contains non-ASCII bytes")]
    NonAsciiHeader,

    #[error("Composite header is too short ({0} bytes)")]
    HeaderTooShort(usize),

    #[error("Composite header lacks the '{0}' token")]
    MissingToken(&'static str),

    #[error("Invalid value '{value}' for header field {field}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid composite timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Product '{0}' is run-length encoded and cannot be decoded")]
    UnsupportedProduct(String),

    #[error("Composite payload holds {found} bytes, expected {expected}")]
    DataSizeMismatch { expected: usize, found: usize },
}
