//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed or timed out
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
