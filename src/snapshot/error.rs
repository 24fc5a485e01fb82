use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported snapshot format '{0}', expected a .json or .toml file")]
    UnsupportedFormat(String),

    #[error("Unknown repository '{0}'")]
    UnknownRepository(String),

    #[error("Duplicate item {key} in repository '{repository}'")]
    DuplicateItem { repository: String, key: String },
}
