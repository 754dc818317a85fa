//! Site generation.
//!
//! Runs the build pipeline over an existing site directory and writes every
//! derived artifact next to the hand-authored post pages:
//!
//! ```text
//! website/
//! ├── index.html                   # Home page
//! ├── posts/
//! │   ├── index.html               # Listing page 1
//! │   ├── page/2/index.html        # Listing pages 2..N
//! │   └── 2026/01/…/index.html     # Post pages (input, never written)
//! ├── categories/
//! │   ├── index.html               # Category index
//! │   └── security/index.html      # One page per category
//! ├── assets/search-index.json
//! └── sitemap.xml
//! ```
//!
//! The catalog and category index are computed once and only read afterwards.
//! Given the same pages, history, and [`BuildContext`], two builds write
//! identical bytes.

use crate::catalog::{self, PAGE_FILE, ScanError};
use crate::categories::CategoryIndex;
use crate::config::SiteConfig;
use crate::history::History;
use crate::pagination::Paginator;
use crate::render::Renderer;
use crate::search;
use crate::sitemap::Sitemap;
use crate::types::{BuildContext, Post, Routes};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Listing(usize),
    Categories,
    Category { label: String, posts: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub route: String,
    /// Relative to the site directory.
    pub output: PathBuf,
}

/// What a build wrote, for CLI output and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub skipped: usize,
    pub pages: Vec<GeneratedPage>,
    pub search_index: PathBuf,
    pub search_entries: usize,
    pub sitemap: PathBuf,
    pub sitemap_urls: usize,
}

/// Scan the posts tree and regenerate every derived page.
pub fn build(
    site_dir: &Path,
    config: &SiteConfig,
    ctx: BuildContext,
    history: &dyn History,
) -> Result<BuildReport, GenerateError> {
    let catalog = catalog::scan(site_dir, config, history)?;
    let mut report = write_site(site_dir, config, ctx, &catalog.posts, history)?;
    report.skipped = catalog.skipped.len();
    Ok(report)
}

/// Render and write the derived pages for an already-built catalog.
pub fn write_site(
    site_dir: &Path,
    config: &SiteConfig,
    ctx: BuildContext,
    posts: &[Post],
    history: &dyn History,
) -> Result<BuildReport, GenerateError> {
    let renderer = Renderer::new(config, ctx);
    let routes = renderer.routes().clone();
    let categories = CategoryIndex::from_posts(posts);
    let paginator = Paginator::new(posts.len(), config.listing.page_size, routes.listing());
    let mut pages = Vec::new();

    let mut emit = |kind: PageKind, route: String, html: String| -> Result<(), GenerateError> {
        let output = write_route(site_dir, &route, &html)?;
        pages.push(GeneratedPage {
            kind,
            route,
            output: relative_to(site_dir, &output),
        });
        Ok(())
    };

    emit(
        PageKind::Listing(1),
        paginator.page_url(1),
        renderer
            .listing_page(1, &paginator, posts, &categories)
            .into_string(),
    )?;
    emit(
        PageKind::Home,
        "/".to_string(),
        renderer.home_page(posts, &categories).into_string(),
    )?;
    for page in paginator.pages().skip(1) {
        emit(
            PageKind::Listing(page),
            paginator.page_url(page),
            renderer
                .listing_page(page, &paginator, posts, &categories)
                .into_string(),
        )?;
    }

    emit(
        PageKind::Categories,
        routes.categories().to_string(),
        renderer.categories_index(&categories).into_string(),
    )?;
    for (slug, group) in categories.iter() {
        emit(
            PageKind::Category {
                label: group.label.clone(),
                posts: group.posts.len(),
            },
            routes.category(slug),
            renderer.category_page(slug, group).into_string(),
        )?;
    }

    let search_index = site_dir.join(&config.paths.search_index);
    write_file(&search_index, &search::to_json(posts)?)?;

    let sitemap = build_sitemap(site_dir, config, &routes, &paginator, &categories, posts, history);
    let sitemap_path = site_dir.join(&config.paths.sitemap);
    write_file(&sitemap_path, &sitemap.to_xml())?;

    info!(
        "built {} pages, {} posts, {} categories",
        pages.len(),
        posts.len(),
        categories.len()
    );

    Ok(BuildReport {
        posts: posts.len(),
        skipped: 0,
        pages,
        search_index: relative_to(site_dir, &search_index),
        search_entries: posts.len(),
        sitemap: relative_to(site_dir, &sitemap_path),
        sitemap_urls: sitemap.len(),
    })
}

/// Sitemap in publication order: home, listing, extra routes, listing pages
/// 2..N, category index, category pages, then every post.
///
/// Generated routes take the last commit date of their output file, posts
/// their catalog `lastmod`.
pub fn build_sitemap(
    site_dir: &Path,
    config: &SiteConfig,
    routes: &Routes,
    paginator: &Paginator,
    categories: &CategoryIndex<'_>,
    posts: &[Post],
    history: &dyn History,
) -> Sitemap {
    let mut sitemap = Sitemap::new(&config.site.base_url);
    let mut add_route = |route: &str| {
        let lastmod = history.last_modified(&route_file(site_dir, route));
        sitemap.add(route, lastmod);
    };

    add_route("/");
    add_route(routes.listing());
    for path in &config.sitemap.extra_paths {
        add_route(path);
    }
    for page in paginator.pages().skip(1) {
        add_route(&paginator.page_url(page));
    }
    add_route(routes.categories());
    for (slug, _) in categories.iter() {
        add_route(&routes.category(slug));
    }

    for post in posts {
        sitemap.add(&post.url_path, Some(post.lastmod.clone()));
    }
    sitemap
}

/// `index.html` file serving `route` under `site_dir`.
pub fn route_file(site_dir: &Path, route: &str) -> PathBuf {
    let mut path = site_dir.to_path_buf();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(PAGE_FILE);
    path
}

/// Write `html` as the page for `route`, returning the file path.
pub fn write_route(site_dir: &Path, route: &str, html: &str) -> Result<PathBuf, GenerateError> {
    let path = route_file(site_dir, route);
    write_file(&path, html)?;
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let io_err = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
