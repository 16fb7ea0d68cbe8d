mod bookmark;

pub use bookmark::BookmarkStore;
