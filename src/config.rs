//! Site configuration module.
//!
//! Handles loading, validating, and merging `postdex.toml`. The file is
//! optional: stock defaults describe the al-ice.ai layout, and a user file only
//! needs the keys it wants to override.
//!
//! ## Config File Location
//!
//! `postdex.toml` is read from the working directory (the project root, next
//! to the site directory) unless `--config <file>` points elsewhere:
//!
//! ```text
//! project/
//! ├── postdex.toml             # Overrides stock defaults (optional)
//! └── website/                 # Site directory (--site)
//!     ├── posts/
//!     │   └── 2026/01/some-post/index.html
//!     └── assets/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://al-ice.ai"   # No trailing slash
//! name = "al-ice.ai"
//! analytics_id = "G-ZX0TZSMV99"   # Google tag id; "" = no snippet
//! disclosure = "Affiliate disclosure: ..."   # Second footer line; "" = none
//!
//! [paths]
//! posts_dir = "posts"
//! categories_dir = "categories"
//! search_index = "assets/search-index.json"
//! sitemap = "sitemap.xml"
//! news_dir = "news"
//! news_log_dir = "news/log"
//!
//! [listing]
//! page_size = 20
//! top_count = 3
//! default_category = "security"
//!
//! [sitemap]
//! extra_paths = ["/search/"]
//!
//! [byline]
//! author = "al-ice.ai Editorial"
//!
//! [news]
//! category = "news"
//! keywords = ["news", "hourly", "digest", "cve"]
//! commit_limit = 60
//! display_limit = 30
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "postdex.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `postdex.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity of the site: base URL, brand name, analytics.
    pub site: SiteSection,
    /// Locations of inputs and outputs, relative to the site directory.
    pub paths: PathsConfig,
    /// Listing, home page, and category defaults.
    pub listing: ListingConfig,
    /// Extra sitemap routes.
    pub sitemap: SitemapConfig,
    /// Author byline migration.
    pub byline: BylineConfig,
    /// News log page.
    pub news: NewsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        if self.listing.page_size == 0 {
            return Err(ConfigError::Validation(
                "listing.page_size must be greater than 0".into(),
            ));
        }
        if self.listing.default_category.is_empty() {
            return Err(ConfigError::Validation(
                "listing.default_category must not be empty".into(),
            ));
        }
        for (key, value) in self.paths.entries() {
            if value.is_empty() || Path::new(value).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "paths.{key} must be a non-empty relative path"
                )));
            }
        }
        for path in &self.sitemap.extra_paths {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sitemap.extra_paths entry '{path}' must start with '/'"
                )));
            }
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute origin prepended to every canonical and sitemap URL.
    pub base_url: String,
    /// Brand shown in the header, titles, and footer.
    pub name: String,
    /// Google tag measurement id. Empty disables the analytics snippet.
    pub analytics_id: String,
    /// Second footer line. Empty omits it.
    pub disclosure: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: "https://al-ice.ai".to_string(),
            name: "al-ice.ai".to_string(),
            analytics_id: "G-ZX0TZSMV99".to_string(),
            disclosure: "Affiliate disclosure: some links may be affiliate links. If you buy, we may earn a commission at no extra cost to you."
                .to_string(),
        }
    }
}

/// Input and output locations, all relative to the site directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub posts_dir: String,
    pub categories_dir: String,
    pub search_index: String,
    pub sitemap: String,
    pub news_dir: String,
    pub news_log_dir: String,
}

impl PathsConfig {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("posts_dir", self.posts_dir.as_str()),
            ("categories_dir", self.categories_dir.as_str()),
            ("search_index", self.search_index.as_str()),
            ("sitemap", self.sitemap.as_str()),
            ("news_dir", self.news_dir.as_str()),
            ("news_log_dir", self.news_log_dir.as_str()),
        ]
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            categories_dir: "categories".to_string(),
            search_index: "assets/search-index.json".to_string(),
            sitemap: "sitemap.xml".to_string(),
            news_dir: "news".to_string(),
            news_log_dir: "news/log".to_string(),
        }
    }
}

/// Listing and home page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Posts per listing page (and size of the home page "Latest" grid).
    pub page_size: usize,
    /// Posts featured in the home page "Top" grid.
    pub top_count: usize,
    /// Category assigned to posts without a `post:category` meta tag.
    pub default_category: String,
    /// Meta description of the home page.
    pub home_description: String,
    /// Meta description of the post listing pages.
    pub listing_description: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            top_count: 3,
            default_category: "security".to_string(),
            home_description: "Latest high-signal AI security, infrastructure, and research updates\u{2014}short summaries with primary sources.".to_string(),
            listing_description: "High-signal AI/security/automation notes and links.".to_string(),
        }
    }
}

/// Sitemap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Hand-written routes (not produced by this tool) to list in the sitemap.
    pub extra_paths: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            extra_paths: vec!["/search/".to_string()],
        }
    }
}

/// Byline migration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BylineConfig {
    pub author: String,
}

impl Default for BylineConfig {
    fn default() -> Self {
        Self {
            author: "al-ice.ai Editorial".to_string(),
        }
    }
}

/// News log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsConfig {
    /// Category slug that marks a post as news.
    pub category: String,
    /// Commit subjects containing any of these (case-insensitive) are listed.
    pub keywords: Vec<String>,
    /// How many commits to ask git for.
    pub commit_limit: usize,
    /// How many commits and news posts to show.
    pub display_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            category: "news".to_string(),
            keywords: vec![
                "news".to_string(),
                "hourly".to_string(),
                "digest".to_string(),
                "cve".to_string(),
            ],
            commit_limit: 60,
            display_limit: 30,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `path`, merged over stock defaults and validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `postdex.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# postdex configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Origin prepended to canonical links and sitemap URLs. No trailing slash.
base_url = "https://al-ice.ai"

# Brand name used in the header, page titles, and footer.
name = "al-ice.ai"

# Google tag measurement id. Set to "" to omit the analytics snippet.
analytics_id = "G-ZX0TZSMV99"

# Second line in the footer. Set to "" to omit it.
disclosure = "Affiliate disclosure: some links may be affiliate links. If you buy, we may earn a commission at no extra cost to you."

# ---------------------------------------------------------------------------
# Paths, relative to the site directory (--site)
# ---------------------------------------------------------------------------
[paths]
posts_dir = "posts"
categories_dir = "categories"
search_index = "assets/search-index.json"
sitemap = "sitemap.xml"
news_dir = "news"
news_log_dir = "news/log"

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
[listing]
# Posts per /posts/ page and per home page "Latest" grid.
page_size = 20

# Posts featured in the home page "Top" grid.
top_count = 3

# Category for posts without a post:category meta tag.
default_category = "security"

home_description = "Latest high-signal AI security, infrastructure, and research updates—short summaries with primary sources."
listing_description = "High-signal AI/security/automation notes and links."

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
# Hand-written routes to list alongside the generated ones.
extra_paths = ["/search/"]

# ---------------------------------------------------------------------------
# Byline migration (postdex bylines)
# ---------------------------------------------------------------------------
[byline]
author = "al-ice.ai Editorial"

# ---------------------------------------------------------------------------
# News log (postdex news-log)
# ---------------------------------------------------------------------------
[news]
category = "news"
keywords = ["news", "hourly", "digest", "cve"]
commit_limit = 60
display_limit = 30
"##
}
