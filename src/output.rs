//! CLI output formatting for every command.
//!
//! Output is **information-centric**: each entity (post, category, generated
//! page) leads with its positional index and title, with paths and dates as
//! indented context lines underneath. Every `format_*` function is pure and
//! returns lines, so the display can be tested without capturing stdout; the
//! matching `print_*` wrapper writes them.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 Prompt injection in CI agents (2026-01-14)
//!     URL: /posts/2026/01/prompt-injection-ci/
//!     Category: Security (security)
//!     Last modified: 2026-01-20
//!
//! Categories
//! 001 Agents (1 post)
//! 002 Security (2 posts)
//!
//! Skipped
//!     posts/drafts/untitled/index.html: missing post:title
//! ```
//!
//! ## Build
//!
//! ```text
//! Posts page 1 → posts/index.html
//! Home → index.html
//! Categories → categories/index.html
//!     001 Agents (1 post) → categories/agents/index.html
//! Search index → assets/search-index.json (4 entries)
//! Sitemap → sitemap.xml (11 URLs)
//! ```

use crate::byline::MigrationReport;
use crate::catalog::Catalog;
use crate::categories::CategoryIndex;
use crate::generate::{BuildReport, PageKind};
use crate::news::NewsReport;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// `001 Security (2 posts)`
fn category_header(index: usize, label: &str, posts: usize) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        label,
        plural(posts, "post", "posts")
    )
}

fn display_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// ============================================================================
// check
// ============================================================================

/// Format the catalog: posts in order, categories, then skipped pages.
pub fn format_catalog_output(catalog: &Catalog, site_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    for (i, post) in catalog.posts.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            post.title,
            post.date
        ));
        lines.push(format!("{}URL: {}", indent(1), post.url_path));
        lines.push(format!(
            "{}Category: {} ({})",
            indent(1),
            post.category_label,
            post.category
        ));
        if post.lastmod != post.date {
            lines.push(format!("{}Last modified: {}", indent(1), post.lastmod));
        }
    }
    if catalog.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    let categories = CategoryIndex::from_posts(&catalog.posts);
    if !categories.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        for (i, (_, group)) in categories.iter().enumerate() {
            lines.push(category_header(i + 1, &group.label, group.posts.len()));
        }
    }

    if !catalog.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &catalog.skipped {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                display_path(site_dir, &skipped.path),
                skipped.reason
            ));
        }
    }
    lines
}

pub fn print_catalog_output(catalog: &Catalog, site_dir: &Path) {
    for line in format_catalog_output(catalog, site_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the build report: every written page in write order, then the
/// search index and sitemap.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut category_index = 0;

    for page in &report.pages {
        let output = page.output.to_string_lossy().replace('\\', "/");
        match &page.kind {
            PageKind::Home => lines.push(format!("Home \u{2192} {}", output)),
            PageKind::Listing(n) => {
                lines.push(format!("Posts page {} \u{2192} {}", n, output))
            }
            PageKind::Categories => lines.push(format!("Categories \u{2192} {}", output)),
            PageKind::Category { label, posts } => {
                category_index += 1;
                lines.push(format!(
                    "{}{} \u{2192} {}",
                    indent(1),
                    category_header(category_index, label, *posts),
                    output
                ));
            }
        }
    }

    lines.push(format!(
        "Search index \u{2192} {} ({})",
        report.search_index.to_string_lossy().replace('\\', "/"),
        plural(report.search_entries, "entry", "entries")
    ));
    lines.push(format!(
        "Sitemap \u{2192} {} ({})",
        report.sitemap.to_string_lossy().replace('\\', "/"),
        plural(report.sitemap_urls, "URL", "URLs")
    ));
    lines.push(format!(
        "{}, {} skipped",
        plural(report.posts, "post", "posts"),
        report.skipped
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// bylines
// ============================================================================

pub fn format_byline_output(report: &MigrationReport, site_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Bylines: {} updated, {} already attributed, {} failed",
        report.updated.len(),
        report.already_attributed.len(),
        report.failed.len()
    )];

    let sections: [(&str, Vec<String>); 3] = [
        (
            "Updated without visible byline (no badge)",
            report
                .missing_byline
                .iter()
                .map(|p| display_path(site_dir, p))
                .collect(),
        ),
        (
            "No anchors",
            report
                .no_anchors
                .iter()
                .map(|p| display_path(site_dir, p))
                .collect(),
        ),
        (
            "Failed",
            report
                .failed
                .iter()
                .map(|(p, e)| format!("{}: {}", display_path(site_dir, p), e))
                .collect(),
        ),
    ];
    for (title, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{}:", title));
        for entry in entries {
            lines.push(format!("{}{}", indent(1), entry));
        }
    }
    lines
}

pub fn print_byline_output(report: &MigrationReport, site_dir: &Path) {
    for line in format_byline_output(report, site_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// news-log
// ============================================================================

pub fn format_news_output(report: &NewsReport, site_dir: &Path) -> Vec<String> {
    vec![format!(
        "News log \u{2192} {} ({}, {})",
        display_path(site_dir, &report.output),
        plural(report.posts, "post", "posts"),
        plural(report.commits, "commit", "commits")
    )]
}

pub fn print_news_output(report: &NewsReport, site_dir: &Path) {
    for line in format_news_output(report, site_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
