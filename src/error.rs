use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("request to issue tracker failed: {0}")]
    Transport(String),
    #[error("unreadable issue tracker response: {0}")]
    Response(String),
    #[error("issue tracker rejected the request: {0}")]
    Api(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
