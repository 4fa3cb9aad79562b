use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Provider error (code {code}): {msg}")]
    ProviderError { code: i64, msg: String },

    #[error("Data error: {0}")]
    DataError(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
