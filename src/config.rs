use std::env;
use std::path::PathBuf;

pub const DEFAULT_BOOKMARKS_KEY: &str = "@news_bookmarks";

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub data_dir: PathBuf,
    pub bookmarks_key: String,
    pub news_base_url: String,
    pub news_api_key: String,
    pub news_default_country: String,
    pub news_timeout_secs: u64,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            data_dir: env::var("NEWSDESK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".newsdesk")),
            bookmarks_key: env::var("BOOKMARKS_KEY")
                .unwrap_or_else(|_| DEFAULT_BOOKMARKS_KEY.to_string()),
            news_base_url: env::var("NEWS_BASE_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            news_api_key: env::var("NEWS_API_KEY").unwrap_or_default(),
            news_default_country: env::var("NEWS_DEFAULT_COUNTRY")
                .unwrap_or_else(|_| "us".to_string()),
            news_timeout_secs: env::var("NEWS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("NEWS_TIMEOUT_SECS must be a number"),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "newsdesk".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "test".to_string(),
            data_dir: PathBuf::from(".newsdesk-test"),
            bookmarks_key: DEFAULT_BOOKMARKS_KEY.to_string(),
            news_base_url: "http://localhost:9".to_string(),
            news_api_key: "test-key".to_string(),
            news_default_country: "us".to_string(),
            news_timeout_secs: 5,
            otel_service_name: "newsdesk-test".to_string(),
            otel_exporter_endpoint: None,
        }
    }
}
