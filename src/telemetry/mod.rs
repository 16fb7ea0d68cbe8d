mod init;
pub mod metrics;

pub use init::{TelemetryGuard, init_telemetry};
pub use metrics::{
    BOOKMARK_CORRUPT_READS, BOOKMARK_STORE_ERRORS, BOOKMARKS_ADDED, BOOKMARKS_REMOVED,
    NEWS_REQUEST_FAILURES, NEWS_REQUESTS,
};
