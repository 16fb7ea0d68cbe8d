use opentelemetry::{
    global,
    metrics::{Counter, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("newsdesk"));

pub static BOOKMARKS_ADDED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("bookmarks.added")
        .with_description("Total bookmarks added")
        .build()
});

pub static BOOKMARKS_REMOVED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("bookmarks.removed")
        .with_description("Total bookmarks removed")
        .build()
});

pub static BOOKMARK_STORE_ERRORS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("bookmarks.store_errors")
        .with_description("Bookmark store reads or writes that failed")
        .build()
});

pub static BOOKMARK_CORRUPT_READS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("bookmarks.corrupt_reads")
        .with_description("Bookmark payloads that could not be decoded")
        .build()
});

pub static NEWS_REQUESTS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("news.requests")
        .with_description("Total news API requests")
        .build()
});

pub static NEWS_REQUEST_FAILURES: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("news.request_failures")
        .with_description("News API requests that failed")
        .build()
});
