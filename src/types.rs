//! Shared types used across the catalog, renderer, and emitters.

use crate::config::PathsConfig;
use serde::Serialize;

/// One post page discovered under the posts directory.
///
/// Built once per page during the catalog scan and never mutated afterwards.
/// `date` and `lastmod` are ISO `YYYY-MM-DD` strings, so lexicographic order
/// is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    /// Declared publish date from `post:date`.
    pub date: String,
    /// Category slug from `post:category`, or the configured fallback.
    pub category: String,
    /// Display label from `post:categoryLabel`, or the capitalized slug.
    pub category_label: String,
    /// Absolute URL path with a trailing slash, e.g. `/posts/2026/01/foo/`.
    pub url_path: String,
    /// Last commit date of the page, or `date` when history has none.
    pub lastmod: String,
}

/// Inputs that vary per run rather than per site.
///
/// The copyright year is passed in explicitly so that two builds of the same
/// catalog with the same context produce identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    pub year: i32,
}

/// URL paths of the generated routes, derived from [`PathsConfig`].
#[derive(Debug, Clone)]
pub struct Routes {
    listing: String,
    categories: String,
}

impl Routes {
    pub fn new(paths: &PathsConfig) -> Self {
        Self {
            listing: dir_route(&paths.posts_dir),
            categories: dir_route(&paths.categories_dir),
        }
    }

    /// First listing page, e.g. `/posts/`.
    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// Category index, e.g. `/categories/`.
    pub fn categories(&self) -> &str {
        &self.categories
    }

    /// One category's page, e.g. `/categories/security/`.
    pub fn category(&self, slug: &str) -> String {
        format!("{}{}/", self.categories, slug)
    }
}

/// Turn a relative directory like `posts` or `blog/posts/` into `/posts/`.
pub fn dir_route(dir: &str) -> String {
    let trimmed = dir.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes() {
        let routes = Routes::new(&PathsConfig::default());
        assert_eq!(routes.listing(), "/posts/");
        assert_eq!(routes.categories(), "/categories/");
        assert_eq!(routes.category("security"), "/categories/security/");
    }

    #[test]
    fn dir_route_normalizes_slashes() {
        assert_eq!(dir_route("posts"), "/posts/");
        assert_eq!(dir_route("/blog/posts/"), "/blog/posts/");
        assert_eq!(dir_route(""), "/");
    }
}
