//! Shared test utilities for the postdex test suite.
//!
//! Provides site fixtures (a copy of `fixtures/site/` or pages written on the
//! fly), a recording in-memory [`History`], and lookup helpers over the
//! catalog.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = scan(tmp.path(), &SiteConfig::default(), &StubHistory::default()).unwrap();
//!
//! let post = find_post(&catalog.posts, "Prompt injection in CI agents");
//! assert_eq!(post.category, "security");
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::history::{Commit, History};
use crate::types::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Page builders
// =========================================================================

/// A rendered post page in the shape the site's post template produces.
pub fn post_page(title: &str, date: &str, category: Option<&str>, label: Option<&str>) -> String {
    let mut head = format!(
        "  <meta name=\"post:title\" content=\"{title}\" />\n  <meta name=\"post:date\" content=\"{date}\" />\n"
    );
    if let Some(category) = category {
        head.push_str(&format!(
            "  <meta name=\"post:category\" content=\"{category}\" />\n"
        ));
    }
    if let Some(label) = label {
        head.push_str(&format!(
            "  <meta name=\"post:categoryLabel\" content=\"{label}\" />\n"
        ));
    }
    let slug = category.unwrap_or("security");
    let badge = label.unwrap_or(slug);
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
{head}</head>
<body>
  <article class="post">
    <h1>{title}</h1>
    <div class="post-meta"><time datetime="{date}">{date}</time> <a class="badge" href="/categories/{slug}/">{badge}</a></div>
    <p>Body text.</p>
  </article>
</body>
</html>
"#
    )
}

/// Write `html` as `<site>/<dir>/index.html`, creating directories.
pub fn write_page(site: &Path, dir: &str, html: &str) -> PathBuf {
    let page_dir = site.join(dir);
    std::fs::create_dir_all(&page_dir).unwrap();
    let path = page_dir.join("index.html");
    std::fs::write(&path, html).unwrap();
    path
}

/// Write a post with category slug and matching capitalized label.
pub fn write_post(site: &Path, dir: &str, title: &str, date: &str, category: &str) -> PathBuf {
    let label = crate::catalog::default_label(category);
    write_page(site, dir, &post_page(title, date, Some(category), Some(&label)))
}

// =========================================================================
// History stub
// =========================================================================

/// In-memory [`History`] that answers from canned data and records lookups.
///
/// Uses Mutex (not RefCell) so it stays Sync like the real implementations.
#[derive(Default)]
pub struct StubHistory {
    /// `(path suffix, date)` pairs; the first suffix the path ends with wins.
    pub dates: Vec<(PathBuf, String)>,
    pub commits: Vec<Commit>,
    pub lookups: Mutex<Vec<PathBuf>>,
}

impl StubHistory {
    pub fn with_date(mut self, suffix: &str, date: &str) -> Self {
        self.dates.push((PathBuf::from(suffix), date.to_string()));
        self
    }

    pub fn with_commit(mut self, timestamp: &str, subject: &str) -> Self {
        self.commits.push(Commit {
            timestamp: timestamp.to_string(),
            subject: subject.to_string(),
        });
        self
    }

    pub fn get_lookups(&self) -> Vec<PathBuf> {
        self.lookups.lock().unwrap().clone()
    }
}

impl History for StubHistory {
    fn last_modified(&self, path: &Path) -> Option<String> {
        self.lookups.lock().unwrap().push(path.to_path_buf());
        self.dates
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|(_, date)| date.clone())
    }

    fn recent_commits(&self, _paths: &[&Path], limit: usize) -> Vec<Commit> {
        self.commits.iter().take(limit).cloned().collect()
    }
}

// =========================================================================
// Catalog lookups — panics with a clear message on miss
// =========================================================================

/// Find a post by title. Panics if not found.
pub fn find_post<'a>(posts: &'a [Post], title: &str) -> &'a Post {
    posts.iter().find(|p| p.title == title).unwrap_or_else(|| {
        let titles = post_titles(posts);
        panic!("post '{title}' not found. Available: {titles:?}")
    })
}

/// All post titles in catalog order.
pub fn post_titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

/// A bare post record for renderer and emitter tests.
pub fn make_post(title: &str, date: &str, category: &str) -> Post {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    Post {
        title: title.to_string(),
        date: date.to_string(),
        category: category.to_string(),
        category_label: crate::catalog::default_label(category),
        url_path: format!("/posts/{}/{}/", &date[..4], slug),
        lastmod: date.to_string(),
    }
}
