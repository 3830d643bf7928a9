//! Error types for SupportSense.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SenseError {
    #[error("Ticket not found")]
    NotFound(i64),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SenseError {
    /// HTTP status code the error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            SenseError::NotFound(_) => 404,
            SenseError::BadRequest(_) | SenseError::Json(_) => 400,
            SenseError::Storage(_) | SenseError::Internal(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SenseError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SenseError>;
