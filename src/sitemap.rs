//! Sitemap generation.
//!
//! Collects every generated route plus every post into `sitemap.xml`:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://al-ice.ai/</loc>
//!     <lastmod>2026-01-14</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! Entries are keyed by absolute URL. Adding a URL twice keeps its original
//! position and replaces its `lastmod`.

use std::collections::HashMap;

/// XML namespace for sitemap
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Full URL location
    pub loc: String,
    /// Last modification date (`YYYY-MM-DD`)
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    base_url: String,
    entries: Vec<SitemapEntry>,
    positions: HashMap<String, usize>,
}

impl Sitemap {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Add `base_url + path`. Re-adding a URL overwrites its `lastmod`.
    pub fn add(&mut self, path: &str, lastmod: Option<String>) {
        let loc = format!("{}{}", self.base_url, path);
        match self.positions.get(&loc) {
            Some(&i) => self.entries[i].lastmod = lastmod,
            None => {
                self.positions.insert(loc.clone(), self.entries.len());
                self.entries.push(SitemapEntry { loc, lastmod });
            }
        }
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.entries.len() * 96);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = &entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
