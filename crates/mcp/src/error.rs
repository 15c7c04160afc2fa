use std::path::PathBuf;

/// Errors that stop the server from starting or serving
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// One or more agents violate the configured thresholds
    #[error("Agent validation failed with {} violation(s)", .violations.len())]
    Validation { violations: Vec<String> },

    #[error("Server must pass agent validation before serving")]
    NotValidated,

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] tokio_util::codec::LinesCodecError),
}
