use thiserror::Error;

/// Structural failure reading a whole registry document
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Markers document is not a JSON object")]
    NotAnObject,

    #[error("Markers document is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Markers document field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Failure decoding a single marker or marker set
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Malformed entry: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown marker type {0}")]
    UnknownKind(i64),
}
