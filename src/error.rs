use thiserror::Error;

use crate::news::NewsError;
use crate::storage::StorageError;

pub const BOOKMARK_UPDATE_FAILED: &str = "Failed to update bookmark. Please try again.";
pub const BOOKMARK_REMOVE_FAILED: &str = "Failed to remove bookmark. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("News error: {0}")]
    News(#[from] NewsError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short text suitable for a non-blocking alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(_) | AppError::Serialization(_) => {
                BOOKMARK_UPDATE_FAILED.to_string()
            }
            AppError::News(e) => e.user_message(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Config(msg) => format!("Error: {}", msg),
            AppError::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
