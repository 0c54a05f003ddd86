// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document container error: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("Document XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Rule error: {0}")]
    Rule(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
