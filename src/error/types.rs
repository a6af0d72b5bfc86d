// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

/// Infrastructure-level failures.
///
/// These never cross the resolver boundary: the resolver and the cache fold
/// them into a `ResolutionFailure` so callers always receive a value.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RMP GraphQL HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("RMP GraphQL errors: {0}")]
    GraphQl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rating channel closed")]
    ChannelClosed,

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("Invalid URL: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
