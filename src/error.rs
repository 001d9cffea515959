//! Unified error types for the facade.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("authentication failed")]
    BadCredentials,

    #[error("no data: {0}")]
    NoData(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
