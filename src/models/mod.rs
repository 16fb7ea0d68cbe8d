mod article;

pub use article::{Article, NewsResponse, Source};
