use thiserror::Error;

/// Errors raised around the provenance values: loading report configuration,
/// looking up build properties and serializing reports.
///
/// Reading the provenance itself never fails.
#[derive(Error, Debug)]
pub enum BuildInfoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown build property '{name}'. Available properties: {available}")]
    UnknownProperty { name: String, available: String },

    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuildInfoError>;
