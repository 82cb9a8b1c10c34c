//! Error types for the results parser

use thiserror::Error;

/// Errors that can occur while turning a raw results log into a corpus
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Line {line} has {found} fields, but field `{field}` requires at least {required}")]
    Structural {
        line: String,
        field: &'static str,
        required: usize,
        found: usize,
    },

    #[error("Field `{field}` is not an integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Demographic field `{0}` collides with a trial column")]
    SchemaCollision(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
