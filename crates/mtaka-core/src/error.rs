use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MtakaError {
    #[error("failed to load dataset: {0}")]
    DatasetLoad(String),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("invalid projection targets: {0}")]
    InvalidTargets(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
