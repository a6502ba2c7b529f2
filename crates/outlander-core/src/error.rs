//! Error types for the Outlander copilot

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds for the two pipeline stages plus the surrounding plumbing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Search service error: {0}")]
    Search(String),

    #[error("Generation service error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
