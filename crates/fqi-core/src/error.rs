use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FqiError {
    #[error("invalid threshold profile: {0}")]
    InvalidProfile(String),

    #[error("failed to load profiles from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("unknown profile '{name}'. Available: {available}")]
    UnknownProfile { name: String, available: String },

    #[error("invalid device payload: {0}")]
    InvalidPayload(String),

    #[error("device '{0}' is not registered")]
    UnknownDevice(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
