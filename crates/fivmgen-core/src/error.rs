use thiserror::Error;

/// Canonical result for the compiler crates.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The API was driven in the wrong order (e.g. emitting before numbering).
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("no SQL type spelling for attribute '{attribute}' of relation '{relation}'")]
    SchemaLookup { relation: String, attribute: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("unknown query '{query}' in group '{group}'")]
    UnknownQuery { group: String, query: String },

    /// A value could not be serialized for fingerprinting.
    #[error("Fingerprint error: {0}")]
    Fingerprint(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Fingerprint(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
