//! Post catalog: walks the posts tree and builds the ordered list of posts.
//!
//! ```text
//! website/posts/
//! ├── index.html                 ← generated listing, skipped
//! ├── page/2/index.html          ← generated pagination, skipped
//! ├── 2026/01/prompt-injection/
//! │   └── index.html             → /posts/2026/01/prompt-injection/
//! └── 2025/12/agents-in-prod/
//!     └── index.html             → /posts/2025/12/agents-in-prod/
//! ```
//!
//! Every other `index.html` below the posts directory is a candidate. A
//! candidate becomes a [`Post`] only when it declares a title and a
//! `YYYY-MM-DD` date; the rest are recorded as [`SkippedPage`]s so `check`
//! can show why they are missing from the site.
//!
//! The walk is sorted by file name, which fixes the relative order of posts
//! sharing a date: the final sort by date is stable.

use crate::config::SiteConfig;
use crate::history::History;
use crate::meta::{self, PostMeta};
use crate::types::Post;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

pub const PAGE_FILE: &str = "index.html";

/// Sub-directory of the posts directory holding generated listing pages.
pub const PAGINATION_DIR: &str = "page";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk posts directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingDate,
    InvalidDate(String),
    DuplicatePath(String),
    Malformed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTitle => write!(f, "missing post:title"),
            SkipReason::MissingDate => write!(f, "missing post:date"),
            SkipReason::InvalidDate(date) => write!(f, "invalid post:date {:?}", date),
            SkipReason::DuplicatePath(url) => write!(f, "duplicate path {}", url),
            SkipReason::Malformed(err) => write!(f, "unreadable markup: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Posts sorted by date, newest first.
    pub posts: Vec<Post>,
    pub skipped: Vec<SkippedPage>,
}

/// Build the catalog from `<site_dir>/<posts_dir>`.
pub fn scan(
    site_dir: &Path,
    config: &SiteConfig,
    history: &dyn History,
) -> Result<Catalog, ScanError> {
    let posts_root = site_dir.join(&config.paths.posts_dir);
    let mut catalog = Catalog::default();
    let mut seen = HashSet::new();

    for page in post_pages(&posts_root)? {
        let html = std::fs::read_to_string(&page).map_err(|source| ScanError::Io {
            path: page.clone(),
            source,
        })?;

        let fields = meta::extract_post_meta(&html)
            .map_err(|e| SkipReason::Malformed(e.to_string()))
            .and_then(|meta| PostFields::from_meta(meta, &config.listing.default_category));
        let fields = match fields {
            Ok(fields) => fields,
            Err(reason) => {
                debug!("skipping {}: {}", page.display(), reason);
                catalog.skipped.push(SkippedPage { path: page, reason });
                continue;
            }
        };

        let url_path = url_path(site_dir, &page);
        if !seen.insert(url_path.clone()) {
            let reason = SkipReason::DuplicatePath(url_path);
            debug!("skipping {}: {}", page.display(), reason);
            catalog.skipped.push(SkippedPage { path: page, reason });
            continue;
        }

        let lastmod = history
            .last_modified(&page)
            .unwrap_or_else(|| fields.date.clone());

        catalog.posts.push(Post {
            title: fields.title,
            date: fields.date,
            category: fields.category,
            category_label: fields.category_label,
            url_path,
            lastmod,
        });
    }

    sort_by_date_desc(&mut catalog.posts);
    info!(
        "catalog: {} posts, {} skipped",
        catalog.posts.len(),
        catalog.skipped.len()
    );
    Ok(catalog)
}

/// Every candidate post page under `posts_root`, in file-name order.
///
/// Skips `posts_root/index.html` and everything below `posts_root/page/`.
/// Symlinks are not followed.
pub fn post_pages(posts_root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let walker = WalkDir::new(posts_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() == 1
                && entry.file_type().is_dir()
                && entry.file_name() == PAGINATION_DIR)
        });

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() < 2 || !entry.file_type().is_file() || entry.file_name() != PAGE_FILE {
            continue;
        }
        pages.push(entry.into_path());
    }
    Ok(pages)
}

/// URL path of a page: its directory relative to `site_dir`, slash-wrapped.
///
/// `website/posts/2026/01/x/index.html` → `/posts/2026/01/x/`.
pub fn url_path(site_dir: &Path, page: &Path) -> String {
    let rel = page.strip_prefix(site_dir).unwrap_or(page);
    let segments: Vec<String> = rel
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// Label used when a page declares a category but no label: `ai-policy` → `Ai-policy`.
pub fn default_label(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strict `YYYY-MM-DD`. Zero padding is required so string order is date order.
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Newest first. Stable, so equal dates keep walk order.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

struct PostFields {
    title: String,
    date: String,
    category: String,
    category_label: String,
}

impl PostFields {
    fn from_meta(meta: PostMeta, default_category: &str) -> Result<Self, SkipReason> {
        let title = meta.title.ok_or(SkipReason::MissingTitle)?;
        let date = meta.date.ok_or(SkipReason::MissingDate)?;
        if !is_iso_date(&date) {
            return Err(SkipReason::InvalidDate(date));
        }
        let category = meta
            .category
            .unwrap_or_else(|| default_category.to_string());
        let category_label = meta
            .category_label
            .unwrap_or_else(|| default_label(&category));
        Ok(Self {
            title,
            date,
            category,
            category_label,
        })
    }
}
