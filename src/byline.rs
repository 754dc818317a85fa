//! One-off author byline migration for existing post pages.
//!
//! For every post page that does not yet name an author, inserts
//!
//! - `<meta name="post:author" content="…">` right after the
//!   `post:categoryLabel` meta tag, and
//! - `<span class="post-author">by …</span>` right after the category badge
//!   in the post's `.post-meta` line.
//!
//! Each insertion only happens when its anchor exists. A page whose markup
//! has no badge anchor is still reported, so layout drift in old posts shows
//! up in the migration summary instead of passing silently.

use crate::catalog::{self, ScanError};
use crate::config::SiteConfig;
use crate::meta::{self, MetaError};
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use maud::html;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BylineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTML rewrite error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
    #[error(transparent)]
    Meta(#[from] MetaError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BylineOutcome {
    /// The page already has a `post:author` meta or a `.post-author` element.
    AlreadyAttributed,
    /// Neither anchor was found; nothing to insert.
    NoAnchors,
    /// New markup. `byline` is false when only the meta tag could be placed.
    Updated { html: String, byline: bool },
}

/// Insert author meta and byline into one page.
pub fn add_byline(html: &str, author: &str) -> Result<BylineOutcome, BylineError> {
    if is_attributed(html)? {
        return Ok(BylineOutcome::AlreadyAttributed);
    }

    let author_meta = html! { meta name=(meta::AUTHOR) content=(author); }.into_string();
    let byline = html! { span.post-author { "by " (author) } }.into_string();
    let mut meta_placed = false;
    let mut byline_placed = false;

    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("meta[name]", |el| {
                    let is_label = el
                        .get_attribute("name")
                        .is_some_and(|n| n.trim().eq_ignore_ascii_case(meta::CATEGORY_LABEL));
                    if is_label && !meta_placed {
                        el.after(&format!("\n  {author_meta}"), ContentType::Html);
                        meta_placed = true;
                    }
                    Ok(())
                }),
                element!(".post-meta > a.badge", |el| {
                    if !byline_placed {
                        el.after(&format!(" {byline}"), ContentType::Html);
                        byline_placed = true;
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    if !meta_placed && !byline_placed {
        return Ok(BylineOutcome::NoAnchors);
    }
    Ok(BylineOutcome::Updated {
        html: rewritten,
        byline: byline_placed,
    })
}

fn is_attributed(html: &str) -> Result<bool, BylineError> {
    let [author] = meta::find_meta(html, [meta::AUTHOR])?;
    if author.is_some() {
        return Ok(true);
    }

    let mut found = false;
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(".post-author", |_el| {
                found = true;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(found)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub updated: Vec<PathBuf>,
    /// Updated pages where the badge anchor for the visible byline was missing.
    pub missing_byline: Vec<PathBuf>,
    pub already_attributed: Vec<PathBuf>,
    pub no_anchors: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Run [`add_byline`] over every post page. Per-page failures are logged and
/// collected; only a failure to walk the posts tree aborts the run.
pub fn migrate(
    site_dir: &Path,
    config: &SiteConfig,
    dry_run: bool,
) -> Result<MigrationReport, ScanError> {
    let posts_root = site_dir.join(&config.paths.posts_dir);
    let mut report = MigrationReport::default();

    for page in catalog::post_pages(&posts_root)? {
        match migrate_page(&page, &config.byline.author, dry_run) {
            Ok(BylineOutcome::AlreadyAttributed) => {
                debug!("already attributed: {}", page.display());
                report.already_attributed.push(page);
            }
            Ok(BylineOutcome::NoAnchors) => {
                warn!("no author anchors in {}", page.display());
                report.no_anchors.push(page);
            }
            Ok(BylineOutcome::Updated { byline, .. }) => {
                if !byline {
                    warn!("no badge for byline in {}", page.display());
                    report.missing_byline.push(page.clone());
                }
                report.updated.push(page);
            }
            Err(e) => {
                warn!("failed to add byline to {}: {}", page.display(), e);
                report.failed.push((page, e.to_string()));
            }
        }
    }

    info!(
        "bylines: {} updated, {} already attributed, {} failed",
        report.updated.len(),
        report.already_attributed.len(),
        report.failed.len()
    );
    Ok(report)
}

fn migrate_page(page: &Path, author: &str, dry_run: bool) -> Result<BylineOutcome, BylineError> {
    let html = std::fs::read_to_string(page)?;
    let outcome = add_byline(&html, author)?;
    if let BylineOutcome::Updated { html, .. } = &outcome {
        if !dry_run {
            std::fs::write(page, html)?;
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    const AUTHOR: &str = "al-ice.ai Editorial";

    fn updated_html(outcome: BylineOutcome) -> (String, bool) {
        match outcome {
            BylineOutcome::Updated { html, byline } => (html, byline),
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    // =========================================================================
    // Single page
    // =========================================================================

    #[test]
    fn inserts_meta_and_byline() {
        let page = post_page("A", "2026-01-14", Some("security"), Some("Security"));
        let (html, byline) = updated_html(add_byline(&page, AUTHOR).unwrap());

        assert!(byline);
        assert!(html.contains(
            "<meta name=\"post:categoryLabel\" content=\"Security\" />\n  <meta name=\"post:author\" content=\"al-ice.ai Editorial\">"
        ));
        assert!(html.contains(
            r#"<a class="badge" href="/categories/security/">Security</a> <span class="post-author">by al-ice.ai Editorial</span></div>"#
        ));
        assert_eq!(meta::extract(&html, meta::AUTHOR).as_deref(), Some(AUTHOR));
    }

    #[test]
    fn rest_of_page_is_untouched() {
        let page = post_page("A", "2026-01-14", Some("security"), Some("Security"));
        let (html, _) = updated_html(add_byline(&page, AUTHOR).unwrap());
        let stripped = html
            .replace("\n  <meta name=\"post:author\" content=\"al-ice.ai Editorial\">", "")
            .replace(" <span class=\"post-author\">by al-ice.ai Editorial</span>", "");
        assert_eq!(stripped, page);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let page = post_page("A", "2026-01-14", Some("security"), Some("Security"));
        let (html, _) = updated_html(add_byline(&page, AUTHOR).unwrap());
        assert_eq!(
            add_byline(&html, AUTHOR).unwrap(),
            BylineOutcome::AlreadyAttributed
        );
    }

    #[test]
    fn existing_post_author_element_counts_as_attributed() {
        let page = r#"<div class="post-meta"><a class="badge" href="/c/">C</a> <span class="post-author">by Someone</span></div>"#;
        assert_eq!(
            add_byline(page, AUTHOR).unwrap(),
            BylineOutcome::AlreadyAttributed
        );
    }

    #[test]
    fn missing_label_meta_still_places_byline() {
        let page = post_page("A", "2026-01-14", Some("security"), None);
        let (html, byline) = updated_html(add_byline(&page, AUTHOR).unwrap());
        assert!(byline);
        assert!(!html.contains(r#"name="post:author""#));
        assert!(html.contains("post-author"));
    }

    #[test]
    fn missing_badge_is_reported() {
        let page = r#"<head><meta name="post:categoryLabel" content="Security"></head><body><p>No meta line</p></body>"#;
        let (html, byline) = updated_html(add_byline(page, AUTHOR).unwrap());
        assert!(!byline);
        assert!(html.contains(r#"name="post:author""#));
    }

    #[test]
    fn badge_outside_post_meta_is_not_an_anchor() {
        let page = r#"<nav><a class="badge" href="/x/">X</a></nav>"#;
        assert_eq!(add_byline(page, AUTHOR).unwrap(), BylineOutcome::NoAnchors);
    }

    #[test]
    fn author_is_escaped() {
        let page = post_page("A", "2026-01-14", Some("security"), Some("Security"));
        let (html, _) = updated_html(add_byline(&page, r#"Tom & "Jerry""#).unwrap());
        assert!(html.contains(r#"content="Tom &amp; &quot;Jerry&quot;""#));
        assert!(html.contains("by Tom &amp; &quot;Jerry&quot;</span>"));
    }

    // =========================================================================
    // Batch
    // =========================================================================

    #[test]
    fn migrate_fixture_site() {
        let tmp = setup_fixtures();
        let site = tmp.path();
        let report = migrate(site, &SiteConfig::default(), false).unwrap();

        // Every candidate page, valid post or not, gets a byline
        assert_eq!(report.updated.len(), 6);
        assert!(report.failed.is_empty());
        assert!(report.missing_byline.is_empty());

        let html = std::fs::read_to_string(
            site.join("posts/2026/01/prompt-injection-ci/index.html"),
        )
        .unwrap();
        assert!(html.contains("by al-ice.ai Editorial"));

        // Generated pages are left alone
        let listing = std::fs::read_to_string(site.join("posts/page/2/index.html")).unwrap();
        assert!(!listing.contains("post-author"));
        let listing = std::fs::read_to_string(site.join("posts/index.html")).unwrap();
        assert!(!listing.contains("post-author"));
    }

    #[test]
    fn migrate_twice_skips_everything() {
        let tmp = setup_fixtures();
        let config = SiteConfig::default();
        migrate(tmp.path(), &config, false).unwrap();
        let report = migrate(tmp.path(), &config, false).unwrap();
        assert!(report.updated.is_empty());
        assert_eq!(report.already_attributed.len(), 6);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let page = write_post(tmp.path(), "posts/a", "A", "2026-01-14", "security");
        let before = std::fs::read_to_string(&page).unwrap();

        let report = migrate(tmp.path(), &SiteConfig::default(), true).unwrap();
        assert_eq!(report.updated, vec![page.clone()]);
        assert_eq!(std::fs::read_to_string(&page).unwrap(), before);
    }

    #[test]
    fn unreadable_page_does_not_abort_batch() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path();
        let good = write_post(site, "posts/b-good", "Good", "2026-01-14", "security");
        let bad = write_page(site, "posts/a-bad", "");
        std::fs::write(&bad, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let report = migrate(site, &SiteConfig::default(), false).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, bad);
        assert_eq!(report.updated, vec![good]);
    }

    #[test]
    fn configured_author() {
        let tmp = TempDir::new().unwrap();
        let page = write_post(tmp.path(), "posts/a", "A", "2026-01-14", "security");
        let mut config = SiteConfig::default();
        config.byline.author = "Alice".to_string();

        migrate(tmp.path(), &config, false).unwrap();
        let html = std::fs::read_to_string(page).unwrap();
        assert!(html.contains("by Alice</span>"));
    }
}
