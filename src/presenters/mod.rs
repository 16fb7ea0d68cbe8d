//! Per-screen state holders.
//!
//! Each presenter keeps a derived copy of bookmark membership and re-derives
//! it from the [`BookmarkStore`](crate::services::BookmarkStore) on the events
//! it documents (activation, focus, refresh). Local toggles await the store
//! and only then touch the copy; a failed store call leaves the copy as it was
//! and raises a non-blocking alert through the [`Notifier`].
//!
//! Presenters do not push changes to each other. A screen that is already
//! mounted picks up another screen's changes on its next activation.

mod bookmarks;
mod detail;
mod home;

pub use bookmarks::BookmarksPresenter;
pub use detail::DetailPresenter;
pub use home::HomePresenter;

pub const ALERT_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Non-blocking user-facing alerts.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Routes alerts to the log; used when no interactive surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(alert.title = %title, alert.message = %message, "User alert");
    }
}
