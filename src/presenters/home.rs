use std::collections::HashSet;
use std::sync::Arc;

use tracing::instrument;

use super::{ALERT_TITLE, LoadState, Notifier};
use crate::{
    AppContext,
    error::{AppError, AppResult},
    models::{Article, NewsResponse},
    news::{NewsError, NewsProvider},
    services::BookmarkStore,
};

enum Feed {
    Headlines,
    Search(String),
}

/// Headlines list with a per-URL bookmark set.
///
/// Membership is re-derived from the store on [`activate`](Self::activate),
/// [`refresh`](Self::refresh), [`search`](Self::search) and
/// [`on_focus`](Self::on_focus). A toggle updates only the one URL it touched.
pub struct HomePresenter {
    store: BookmarkStore,
    news: Arc<dyn NewsProvider>,
    notifier: Arc<dyn Notifier>,
    country: String,
    articles: Vec<Article>,
    bookmarked: HashSet<String>,
    state: LoadState,
    refreshing: bool,
}

impl HomePresenter {
    pub fn new(context: &AppContext) -> Self {
        Self {
            store: context.bookmarks.clone(),
            news: context.news.clone(),
            notifier: context.notifier.clone(),
            country: context.default_country.clone(),
            articles: Vec::new(),
            bookmarked: HashSet::new(),
            state: LoadState::Idle,
            refreshing: false,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarked.contains(url)
    }

    /// Feed articles paired with their current bookmark flag.
    pub fn items(&self) -> impl Iterator<Item = (&Article, bool)> {
        self.articles
            .iter()
            .map(|article| (article, self.bookmarked.contains(&article.url)))
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The feed article for `url`, annotated for handing to a detail screen.
    pub fn open_article(&self, url: &str) -> Option<Article> {
        self.articles
            .iter()
            .find(|article| article.url == url)
            .map(|article| article.clone().with_bookmark_flag(self.is_bookmarked(url)))
    }

    /// Initial mount.
    #[instrument(name = "presenter.home.activate", skip(self))]
    pub async fn activate(&mut self) {
        self.load(Feed::Headlines).await;
    }

    /// Pull-to-refresh.
    #[instrument(name = "presenter.home.refresh", skip(self))]
    pub async fn refresh(&mut self) {
        self.refreshing = true;
        self.load(Feed::Headlines).await;
        self.refreshing = false;
    }

    #[instrument(name = "presenter.home.search", skip(self))]
    pub async fn search(&mut self, query: &str) {
        self.load(Feed::Search(query.to_string())).await;
    }

    /// Screen regained focus: bookmarks may have changed elsewhere, the feed
    /// itself is kept.
    #[instrument(name = "presenter.home.on_focus", skip(self))]
    pub async fn on_focus(&mut self) {
        self.sync_bookmarks().await;
    }

    /// Flips the bookmark for a feed article. Returns the new membership.
    #[instrument(name = "presenter.home.toggle_bookmark", skip(self))]
    pub async fn toggle_bookmark(&mut self, url: &str) -> AppResult<bool> {
        let Some(article) = self.articles.iter().find(|article| article.url == url).cloned() else {
            return Err(AppError::NotFound(format!("Article not in feed: {}", url)));
        };

        let currently_bookmarked = self.bookmarked.contains(url);
        let result = if currently_bookmarked {
            self.store.remove(url).await
        } else {
            self.store.add(&article).await
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Error toggling bookmark");
            self.notifier.notify(ALERT_TITLE, &e.user_message());
            return Err(e);
        }

        if currently_bookmarked {
            self.bookmarked.remove(url);
        } else {
            self.bookmarked.insert(article.url);
        }

        Ok(!currently_bookmarked)
    }

    async fn load(&mut self, feed: Feed) {
        self.state = LoadState::Loading;

        match self.fetch(&feed).await {
            Ok(response) => {
                tracing::info!(
                    provider = self.news.name(),
                    articles = response.articles.len(),
                    total_results = response.total_results,
                    "News loaded"
                );
                self.articles = response.articles;
                self.sync_bookmarks().await;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                // Previously displayed articles stay on screen.
                tracing::error!(provider = self.news.name(), error = %e, "Error fetching news");
                self.state = LoadState::Failed;
                self.notifier.notify(ALERT_TITLE, &e.user_message());
            }
        }
    }

    async fn fetch(&self, feed: &Feed) -> Result<NewsResponse, NewsError> {
        match feed {
            Feed::Headlines => self.news.top_headlines(&self.country).await,
            Feed::Search(query) => self.news.search(query).await,
        }
    }

    async fn sync_bookmarks(&mut self) {
        self.bookmarked = self
            .store
            .list()
            .await
            .into_iter()
            .map(|bookmark| bookmark.url)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BOOKMARKS_KEY;
    use crate::test_support::{FlakyStore, RecordingNotifier, StubNewsProvider, sample_article};

    struct Fixture {
        context: AppContext,
        kv: Arc<FlakyStore>,
        news: Arc<StubNewsProvider>,
        notifier: Arc<RecordingNotifier>,
    }

    fn create_fixture() -> Fixture {
        let kv = FlakyStore::new();
        let news = Arc::new(StubNewsProvider::with_headlines(vec![
            sample_article(1),
            sample_article(2),
        ]));
        let notifier = Arc::new(RecordingNotifier::default());
        let store = BookmarkStore::new(kv.clone(), DEFAULT_BOOKMARKS_KEY);
        let context = AppContext::new(store, news.clone(), notifier.clone(), "gb");
        Fixture {
            context,
            kv,
            news,
            notifier,
        }
    }

    #[tokio::test]
    async fn test_activate_loads_headlines_for_country() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        assert_eq!(home.state(), LoadState::Idle);

        home.activate().await;

        assert_eq!(home.state(), LoadState::Ready);
        assert_eq!(home.len(), 2);
        assert_eq!(fixture.news.last_country().as_deref(), Some("gb"));
    }

    #[tokio::test]
    async fn test_activate_derives_existing_bookmarks() {
        let fixture = create_fixture();
        fixture.context.bookmarks.add(&sample_article(2)).await.unwrap();

        let mut home = fixture.context.home();
        home.activate().await;

        let flags: Vec<bool> = home.items().map(|(_, flag)| flag).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;
        let url = sample_article(1).url;

        assert!(home.toggle_bookmark(&url).await.unwrap());
        assert!(home.is_bookmarked(&url));
        assert!(fixture.context.bookmarks.is_bookmarked(&url).await);

        assert!(!home.toggle_bookmark(&url).await.unwrap());
        assert!(!home.is_bookmarked(&url));
        assert!(!fixture.context.bookmarks.is_bookmarked(&url).await);
    }

    #[tokio::test]
    async fn test_toggle_only_touches_one_article() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;

        home.toggle_bookmark(&sample_article(2).url).await.unwrap();

        assert!(!home.is_bookmarked(&sample_article(1).url));
        assert!(home.is_bookmarked(&sample_article(2).url));
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_view_and_alerts() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;
        let url = sample_article(1).url;

        fixture.kv.fail_writes(true);
        assert!(home.toggle_bookmark(&url).await.is_err());

        assert!(!home.is_bookmarked(&url));
        assert_eq!(
            fixture.notifier.alerts(),
            vec![(
                "Error".to_string(),
                "Failed to update bookmark. Please try again.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_toggle_unknown_url_is_not_found() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;

        let result = home.toggle_bookmark("https://example.com/unknown").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(fixture.context.bookmarks.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_articles() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;

        fixture.news.fail_next(NewsError::RateLimited);
        home.refresh().await;

        assert_eq!(home.state(), LoadState::Failed);
        assert!(!home.is_refreshing());
        assert_eq!(home.len(), 2);
        assert_eq!(
            fixture.notifier.messages(),
            vec!["API rate limit exceeded. Please try again later.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_initial_load_shows_empty_feed() {
        let fixture = create_fixture();
        fixture.news.fail_next(NewsError::Unauthorized);

        let mut home = fixture.context.home();
        home.activate().await;

        assert_eq!(home.state(), LoadState::Failed);
        assert!(home.is_empty());
        assert_eq!(fixture.notifier.alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_search_replaces_feed_and_keeps_flags() {
        let fixture = create_fixture();
        fixture.context.bookmarks.add(&sample_article(9)).await.unwrap();
        fixture
            .news
            .set_search_results(vec![sample_article(9), sample_article(10)]);

        let mut home = fixture.context.home();
        home.activate().await;
        home.search("rust").await;

        let urls: Vec<&str> = home.items().map(|(article, _)| article.url.as_str()).collect();
        assert_eq!(urls, vec![sample_article(9).url, sample_article(10).url]);
        assert!(home.is_bookmarked(&sample_article(9).url));
        assert_eq!(fixture.news.last_query().as_deref(), Some("rust"));
    }

    #[tokio::test]
    async fn test_open_article_carries_flag() {
        let fixture = create_fixture();
        let mut home = fixture.context.home();
        home.activate().await;
        home.toggle_bookmark(&sample_article(1).url).await.unwrap();

        let opened = home.open_article(&sample_article(1).url).unwrap();
        assert!(opened.is_bookmarked);
        assert!(home.open_article("https://example.com/missing").is_none());
    }
}
