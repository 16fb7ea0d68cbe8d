use std::sync::Arc;

use tracing::instrument;

use super::{ALERT_TITLE, LoadState, Notifier};
use crate::{
    AppContext,
    error::{AppResult, BOOKMARK_REMOVE_FAILED},
    models::Article,
    services::BookmarkStore,
};

/// Saved-articles list. Reloads on activation, focus and refresh; an
/// un-bookmark drops the row as soon as the store confirms.
pub struct BookmarksPresenter {
    store: BookmarkStore,
    notifier: Arc<dyn Notifier>,
    bookmarks: Vec<Article>,
    state: LoadState,
    refreshing: bool,
}

impl BookmarksPresenter {
    pub fn new(context: &AppContext) -> Self {
        Self {
            store: context.bookmarks.clone(),
            notifier: context.notifier.clone(),
            bookmarks: Vec::new(),
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

    pub fn bookmarks(&self) -> &[Article] {
        &self.bookmarks
    }

    /// Drives the "No Bookmarked Articles" placeholder.
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    #[instrument(name = "presenter.bookmarks.activate", skip(self))]
    pub async fn activate(&mut self) {
        self.reload().await;
    }

    #[instrument(name = "presenter.bookmarks.on_focus", skip(self))]
    pub async fn on_focus(&mut self) {
        self.reload().await;
    }

    #[instrument(name = "presenter.bookmarks.refresh", skip(self))]
    pub async fn refresh(&mut self) {
        self.refreshing = true;
        self.reload().await;
        self.refreshing = false;
    }

    #[instrument(name = "presenter.bookmarks.remove", skip(self))]
    pub async fn remove_bookmark(&mut self, url: &str) -> AppResult<bool> {
        let removed = match self.store.remove(url).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!(error = %e, "Error removing bookmark");
                self.notifier.notify(ALERT_TITLE, BOOKMARK_REMOVE_FAILED);
                return Err(e);
            }
        };

        self.bookmarks.retain(|bookmark| bookmark.url != url);
        Ok(removed)
    }

    async fn reload(&mut self) {
        self.state = LoadState::Loading;
        // The store degrades unreadable data to an empty list, so this cannot
        // fail.
        self.bookmarks = self.store.list().await;
        self.state = LoadState::Ready;
    }
}
