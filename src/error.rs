use thiserror::Error;

/// Failure to obtain the raw survey export. Distinct from an export that
/// loads fine but holds no valid rows.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("survey export returned HTTP {0}")]
    Status(u16),

    #[error("invalid survey export URL: {0}")]
    Url(String),

    #[error("failed to read survey export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid submission endpoint: {0}")]
    Url(String),

    #[error("failed to encode submission: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("wrong dashboard password")]
    WrongPassword,

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("{0} must list at least one store")]
    NoStores(&'static str),
}
