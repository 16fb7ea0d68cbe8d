use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::Article,
    storage::KeyValueStore,
    telemetry::{BOOKMARK_CORRUPT_READS, BOOKMARK_STORE_ERRORS, BOOKMARKS_ADDED, BOOKMARKS_REMOVED},
};

/// Durable, deduplicated list of bookmarked articles kept under one key of a
/// [`KeyValueStore`] as a JSON array.
///
/// Reads never fail: an unreadable or malformed payload is logged and treated
/// as an empty set. Mutations rewrite the whole array and are serialized per
/// store (clones share the lock), so overlapping `add`/`remove` calls cannot
/// interleave their read and write phases. A mutation whose read hits a
/// storage error fails without writing; a malformed payload is replaced.
#[derive(Clone)]
pub struct BookmarkStore {
    kv: Arc<dyn KeyValueStore>,
    key: Arc<str>,
    mutation_lock: Arc<Mutex<()>>,
}

impl BookmarkStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: Arc::from(key.into()),
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All bookmarks in insertion order.
    #[instrument(name = "bookmark.list", skip(self))]
    pub async fn list(&self) -> Vec<Article> {
        self.load().await
    }

    #[instrument(name = "bookmark.is_bookmarked", skip(self))]
    pub async fn is_bookmarked(&self, url: &str) -> bool {
        self.load().await.iter().any(|bookmark| bookmark.url == url)
    }

    #[instrument(name = "bookmark.count", skip(self))]
    pub async fn count(&self) -> usize {
        self.load().await.len()
    }

    /// Appends `article` unless its URL is already present. Returns whether
    /// it was inserted.
    #[instrument(name = "bookmark.add", skip(self, article), fields(url = %article.url))]
    pub async fn add(&self, article: &Article) -> AppResult<bool> {
        let _guard = self.mutation_lock.lock().await;

        let mut bookmarks = self.load_for_update().await?;
        if bookmarks.iter().any(|bookmark| bookmark.url == article.url) {
            tracing::debug!("Article already bookmarked");
            return Ok(false);
        }

        bookmarks.push(article.clone().with_bookmark_flag(true));

        if let Err(e) = self.persist(&bookmarks).await {
            BOOKMARK_STORE_ERRORS.add(1, &[]);
            tracing::error!(error = %e, "Error adding bookmark");
            return Err(e);
        }

        BOOKMARKS_ADDED.add(1, &[]);
        tracing::info!(total = bookmarks.len(), "Bookmark added");

        Ok(true)
    }

    /// Drops the entry for `url`, if any. Returns whether one was removed.
    #[instrument(name = "bookmark.remove", skip(self))]
    pub async fn remove(&self, url: &str) -> AppResult<bool> {
        let _guard = self.mutation_lock.lock().await;

        let bookmarks = self.load_for_update().await?;
        let before = bookmarks.len();
        let remaining: Vec<Article> = bookmarks
            .into_iter()
            .filter(|bookmark| bookmark.url != url)
            .collect();

        if remaining.len() == before {
            tracing::debug!("Article was not bookmarked");
            return Ok(false);
        }

        if let Err(e) = self.persist(&remaining).await {
            BOOKMARK_STORE_ERRORS.add(1, &[]);
            tracing::error!(error = %e, "Error removing bookmark");
            return Err(e);
        }

        BOOKMARKS_REMOVED.add(1, &[]);
        tracing::info!(total = remaining.len(), "Bookmark removed");

        Ok(true)
    }

    async fn load(&self) -> Vec<Article> {
        match self.try_load().await {
            Ok(bookmarks) => bookmarks,
            Err(AppError::Serialization(e)) => {
                BOOKMARK_CORRUPT_READS.add(1, &[]);
                tracing::warn!(key = %self.key, error = %e, "Discarding malformed bookmarks payload");
                Vec::new()
            }
            Err(e) => {
                BOOKMARK_STORE_ERRORS.add(1, &[]);
                tracing::error!(key = %self.key, error = %e, "Error getting bookmarks");
                Vec::new()
            }
        }
    }

    /// Read phase of a mutation. Unlike [`Self::load`], storage failures are
    /// returned; only a malformed payload reads as empty.
    async fn load_for_update(&self) -> AppResult<Vec<Article>> {
        match self.try_load().await {
            Err(AppError::Serialization(e)) => {
                BOOKMARK_CORRUPT_READS.add(1, &[]);
                tracing::warn!(key = %self.key, error = %e, "Replacing malformed bookmarks payload");
                Ok(Vec::new())
            }
            Err(e) => {
                BOOKMARK_STORE_ERRORS.add(1, &[]);
                tracing::error!(key = %self.key, error = %e, "Error reading bookmarks for update");
                Err(e)
            }
            ok => ok,
        }
    }

    async fn try_load(&self) -> AppResult<Vec<Article>> {
        let Some(payload) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        let stored: Vec<Article> = serde_json::from_str(&payload)?;

        // Presence is membership; the stored flag is not consulted. A payload
        // written by something else may repeat a URL, first occurrence wins.
        let mut seen = HashSet::with_capacity(stored.len());
        Ok(stored
            .into_iter()
            .filter(|bookmark| seen.insert(bookmark.url.clone()))
            .map(|bookmark| bookmark.with_bookmark_flag(true))
            .collect())
    }

    async fn persist(&self, bookmarks: &[Article]) -> AppResult<()> {
        let payload = serde_json::to_string(bookmarks)?;
        self.kv.set(&self.key, &payload).await?;
        Ok(())
    }
}
