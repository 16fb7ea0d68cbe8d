use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use super::{NewsError, NewsProvider};
use crate::config::Config;
use crate::models::NewsResponse;
use crate::telemetry::{NEWS_REQUEST_FAILURES, NEWS_REQUESTS};

/// Client for the newsapi.org v2 REST API.
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct NewsApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl NewsApiClient {
    pub fn new(config: &Config) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.news_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.news_base_url.trim_end_matches('/').to_string(),
            api_key: config.news_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<NewsResponse, NewsError> {
        NEWS_REQUESTS.add(1, &[]);

        let result = self.send(path, params).await;
        if let Err(e) = &result {
            NEWS_REQUEST_FAILURES.add(1, &[]);
            tracing::error!(path, error = %e, "Error fetching news");
        }
        result
    }

    async fn send(&self, path: &str, params: &[(&str, &str)]) -> Result<NewsResponse, NewsError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if let Some(error) = NewsError::from_status(status) {
            if let Ok(detail) = serde_json::from_str::<NewsApiErrorBody>(&body) {
                tracing::warn!(
                    status = status.as_u16(),
                    code = detail.code.as_deref().unwrap_or(""),
                    message = detail.message.as_deref().unwrap_or(""),
                    "News API returned an error"
                );
            }
            return Err(error);
        }

        decode_response(&body)
    }
}

fn decode_response(body: &str) -> Result<NewsResponse, NewsError> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait::async_trait]
impl NewsProvider for NewsApiClient {
    #[instrument(name = "news.top_headlines", skip(self))]
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse, NewsError> {
        self.fetch("top-headlines", &[("country", country)]).await
    }

    #[instrument(name = "news.search", skip(self))]
    async fn search(&self, query: &str) -> Result<NewsResponse, NewsError> {
        self.fetch("everything", &[("q", query), ("sortBy", "publishedAt")])
            .await
    }

    fn name(&self) -> &str {
        "newsapi"
    }
}
