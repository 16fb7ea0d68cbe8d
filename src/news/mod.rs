pub mod newsapi;

pub use newsapi::NewsApiClient;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::NewsResponse;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("News API rejected the API key")]
    Unauthorized,

    #[error("News API rate limit exceeded")]
    RateLimited,

    #[error("News API server error ({0})")]
    Server(StatusCode),

    #[error("News API returned {0}")]
    Status(StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed news response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NewsError {
    /// Classifies a non-success HTTP status. Returns `None` for 2xx.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        Some(match status {
            StatusCode::UNAUTHORIZED => NewsError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => NewsError::RateLimited,
            s if s.is_server_error() => NewsError::Server(s),
            s => NewsError::Status(s),
        })
    }

    pub fn user_message(&self) -> String {
        match self {
            NewsError::Unauthorized => {
                "API key is invalid. Please check your API configuration.".to_string()
            }
            NewsError::RateLimited => "API rate limit exceeded. Please try again later.".to_string(),
            NewsError::Server(_) => "Server error. Please try again later.".to_string(),
            NewsError::Status(_) => {
                "Failed to fetch news articles. Please try again.".to_string()
            }
            NewsError::Network(_) => {
                "Network error. Please check your internet connection.".to_string()
            }
            NewsError::Decode(e) => format!("Error: {}", e),
        }
    }
}

/// Remote supplier of articles.
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse, NewsError>;
    async fn search(&self, query: &str) -> Result<NewsResponse, NewsError>;
    fn name(&self) -> &str;
}
