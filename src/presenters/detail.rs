use std::sync::Arc;

use tracing::instrument;

use super::{ALERT_TITLE, LoadState, Notifier};
use crate::{AppContext, error::AppResult, models::Article, services::BookmarkStore};

pub struct DetailPresenter {
    store: BookmarkStore,
    notifier: Arc<dyn Notifier>,
    article: Article,
    is_bookmarked: bool,
    state: LoadState,
}

impl DetailPresenter {
    /// The flag starts from the article's annotation and is corrected on
    /// [`activate`](Self::activate).
    pub fn new(context: &AppContext, article: Article) -> Self {
        let is_bookmarked = article.is_bookmarked;
        Self {
            store: context.bookmarks.clone(),
            notifier: context.notifier.clone(),
            article,
            is_bookmarked,
            state: LoadState::Idle,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn is_bookmarked(&self) -> bool {
        self.is_bookmarked
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn formatted_date(&self) -> String {
        self.article.formatted_date()
    }

    pub fn display_content(&self) -> Option<String> {
        self.article.display_content()
    }

    #[instrument(name = "presenter.detail.activate", skip(self), fields(url = %self.article.url))]
    pub async fn activate(&mut self) {
        self.state = LoadState::Loading;
        self.is_bookmarked = self.store.is_bookmarked(&self.article.url).await;
        self.state = LoadState::Ready;
    }

    /// Returns the new membership.
    #[instrument(name = "presenter.detail.toggle_bookmark", skip(self), fields(url = %self.article.url))]
    pub async fn toggle_bookmark(&mut self) -> AppResult<bool> {
        let result = if self.is_bookmarked {
            self.store.remove(&self.article.url).await
        } else {
            self.store.add(&self.article).await
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Error toggling bookmark");
            self.notifier.notify(ALERT_TITLE, &e.user_message());
            return Err(e);
        }

        self.is_bookmarked = !self.is_bookmarked;
        Ok(self.is_bookmarked)
    }
}
