//! Client-side search index.
//!
//! A flat JSON array in catalog order, fetched and filtered by the search
//! page in the browser:
//!
//! ```json
//! [{"title":"…","date":"2026-01-14","category":"security","categoryLabel":"Security","urlPath":"/posts/…/"}]
//! ```

use crate::types::Post;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub title: String,
    pub date: String,
    pub category: String,
    pub category_label: String,
    pub url_path: String,
}

impl From<&Post> for SearchEntry {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            date: post.date.clone(),
            category: post.category.clone(),
            category_label: post.category_label.clone(),
            url_path: post.url_path.clone(),
        }
    }
}

pub fn index(posts: &[Post]) -> Vec<SearchEntry> {
    posts.iter().map(SearchEntry::from).collect()
}

/// Compact JSON of [`index`].
pub fn to_json(posts: &[Post]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&index(posts))
}
