//! News log: an audit page of recent news publishing.
//!
//! Two lists, each capped at `news.display_limit`:
//!
//! - catalog posts in the news category, most recently changed first;
//! - recent commits touching the posts or news directories whose subject
//!   mentions one of `news.keywords` (case-insensitive).
//!
//! Rendered to `<site>/<news_log_dir>/index.html` through the shared shell.

use crate::config::{NewsConfig, SiteConfig};
use crate::generate::{self, GenerateError};
use crate::history::{Commit, History};
use crate::render::Renderer;
use crate::types::{BuildContext, Post, dir_route};
use std::path::{Path, PathBuf};
use tracing::info;

/// Data behind the news log page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsLog<'a> {
    pub posts: Vec<&'a Post>,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsReport {
    pub output: PathBuf,
    pub posts: usize,
    pub commits: usize,
}

/// Gather news posts from the catalog and matching commits from history.
pub fn collect<'a>(
    posts: &'a [Post],
    config: &NewsConfig,
    commit_paths: &[&Path],
    history: &dyn History,
) -> NewsLog<'a> {
    let mut news_posts: Vec<&Post> = posts
        .iter()
        .filter(|p| p.category == config.category)
        .collect();
    news_posts.sort_by(|a, b| b.lastmod.cmp(&a.lastmod));
    news_posts.truncate(config.display_limit);

    let commits = history
        .recent_commits(commit_paths, config.commit_limit)
        .into_iter()
        .filter(|c| is_news_subject(&c.subject, &config.keywords))
        .take(config.display_limit)
        .collect();

    NewsLog {
        posts: news_posts,
        commits,
    }
}

pub fn is_news_subject(subject: &str, keywords: &[String]) -> bool {
    let subject = subject.to_lowercase();
    keywords
        .iter()
        .any(|k| !k.is_empty() && subject.contains(&k.to_lowercase()))
}

/// `2026-01-13T08:00:00Z` → `2026-01-13 08:00:00 UTC`. Offsets other than
/// `Z` are left as written.
pub fn display_timestamp(iso: &str) -> String {
    iso.replacen('T', " ", 1).replacen('Z', " UTC", 1)
}

/// Render and write the news log page.
pub fn build_news_log(
    site_dir: &Path,
    config: &SiteConfig,
    ctx: BuildContext,
    posts: &[Post],
    history: &dyn History,
) -> Result<NewsReport, GenerateError> {
    let posts_dir = site_dir.join(&config.paths.posts_dir);
    let news_dir = site_dir.join(&config.paths.news_dir);
    let log = collect(
        posts,
        &config.news,
        &[posts_dir.as_path(), news_dir.as_path()],
        history,
    );

    let route = dir_route(&config.paths.news_log_dir);
    let html = Renderer::new(config, ctx).news_log_page(&log, &route);
    let output = generate::write_route(site_dir, &route, &html.into_string())?;

    info!(
        "news log: {} posts, {} commits",
        log.posts.len(),
        log.commits.len()
    );
    Ok(NewsReport {
        output,
        posts: log.posts.len(),
        commits: log.commits.len(),
    })
}
