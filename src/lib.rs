pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod presenters;
pub mod services;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;

use std::sync::Arc;

use models::Article;
use news::NewsProvider;
use presenters::{BookmarksPresenter, DetailPresenter, HomePresenter, Notifier};
use services::BookmarkStore;

/// Dependencies shared by every screen, built once at startup and passed to
/// each presenter explicitly.
#[derive(Clone)]
pub struct AppContext {
    pub bookmarks: BookmarkStore,
    pub news: Arc<dyn NewsProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub default_country: String,
}

impl AppContext {
    pub fn new(
        bookmarks: BookmarkStore,
        news: Arc<dyn NewsProvider>,
        notifier: Arc<dyn Notifier>,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            bookmarks,
            news,
            notifier,
            default_country: default_country.into(),
        }
    }

    pub fn home(&self) -> HomePresenter {
        HomePresenter::new(self)
    }

    pub fn bookmarks_screen(&self) -> BookmarksPresenter {
        BookmarksPresenter::new(self)
    }

    pub fn detail(&self, article: Article) -> DetailPresenter {
        DetailPresenter::new(self, article)
    }
}
