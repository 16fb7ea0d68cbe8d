use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

static TRUNCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\+\d+ chars\]$").expect("truncation marker regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: String,
}

/// A single news item. `url` is its identity.
///
/// `is_bookmarked` is a view annotation only: it is written as `true` for
/// every stored bookmark, but membership is always decided by presence in the
/// bookmark set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Article {
    pub fn with_bookmark_flag(mut self, is_bookmarked: bool) -> Self {
        self.is_bookmarked = is_bookmarked;
        self
    }

    pub fn published_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.published_at, &Rfc3339).ok()
    }

    /// `January 15, 2024, 09:05 AM` (hour zero-padded), or the raw timestamp when it does not parse.
    pub fn formatted_date(&self) -> String {
        let format = format_description!(
            "[month repr:long] [day padding:none], [year], [hour repr:12]:[minute] [period]"
        );

        self.published_at()
            .and_then(|date| date.format(&format).ok())
            .unwrap_or_else(|| self.published_at.clone())
    }

    /// Body text without the trailing `[+N chars]` marker the news API appends.
    pub fn display_content(&self) -> Option<String> {
        self.content
            .as_deref()
            .map(|content| TRUNCATION_MARKER.replace(content, "").trim_end().to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}
