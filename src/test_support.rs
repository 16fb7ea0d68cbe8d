use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::models::{Article, NewsResponse, Source};
use crate::news::{NewsError, NewsProvider};
use crate::presenters::Notifier;
use crate::storage::{KeyValueStore, MemoryStore, StorageError};

pub fn sample_article(n: u32) -> Article {
    Article {
        source: Source {
            id: None,
            name: "Example Times".to_string(),
        },
        author: Some(format!("Author {}", n)),
        title: format!("Article {}", n),
        description: Some(format!("Summary of article {}", n)),
        url: format!("https://example.com/articles/{}", n),
        url_to_image: None,
        published_at: "2024-03-05T09:15:00Z".to_string(),
        content: Some(format!("Body of article {} [+120 chars]", n)),
        is_bookmarked: false,
    }
}

/// Memory-backed store whose reads and writes can be switched to fail, with
/// an optional delay on reads to widen read-modify-write windows.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_delay: Duration,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_read_delay(read_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            read_delay,
            ..Self::default()
        })
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        let value = self.inner.get(key).await?;
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.inner.remove(key).await
    }
}

#[derive(Default)]
pub struct StubNewsProvider {
    headlines: Mutex<Vec<Article>>,
    search_results: Mutex<Vec<Article>>,
    failures: Mutex<VecDeque<NewsError>>,
    last_country: Mutex<Option<String>>,
    last_query: Mutex<Option<String>>,
}

impl StubNewsProvider {
    pub fn with_headlines(headlines: Vec<Article>) -> Self {
        Self {
            headlines: Mutex::new(headlines),
            ..Self::default()
        }
    }

    pub fn set_search_results(&self, articles: Vec<Article>) {
        *self.search_results.lock().unwrap() = articles;
    }

    /// The next request fails with `error`.
    pub fn fail_next(&self, error: NewsError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn last_country(&self) -> Option<String> {
        self.last_country.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    fn respond(&self, articles: &Mutex<Vec<Article>>) -> Result<NewsResponse, NewsError> {
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        let articles = articles.lock().unwrap().clone();
        Ok(NewsResponse {
            status: "ok".to_string(),
            total_results: articles.len() as u64,
            articles,
        })
    }
}

#[async_trait::async_trait]
impl NewsProvider for StubNewsProvider {
    async fn top_headlines(&self, country: &str) -> Result<NewsResponse, NewsError> {
        *self.last_country.lock().unwrap() = Some(country.to_string());
        self.respond(&self.headlines)
    }

    async fn search(&self, query: &str) -> Result<NewsResponse, NewsError> {
        *self.last_query.lock().unwrap() = Some(query.to_string());
        self.respond(&self.search_results)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.alerts().into_iter().map(|(_, message)| message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
