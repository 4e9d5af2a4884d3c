use std::path::PathBuf;

use thiserror::Error;

/// Invalid parameters on an RPC command
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("Expected params to be an array")]
    NotAnArray,

    #[error("Missing param at index {0}")]
    Missing(usize),

    #[error("Param at index {index} must be {expected}")]
    InvalidType {
        index: usize,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read markers file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write markers file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid markers json: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid markers json: document is not an object")]
    NotAnObject,
}
