//! # postdex
//!
//! Regenerates the derived pages of a pre-rendered HTML blog. Post pages are
//! written by hand (or by another tool) and carry their metadata in `<meta>`
//! tags; postdex reads them back and rebuilds everything that lists them:
//! the home page, the paginated post listing, category pages, the sitemap,
//! and the client-side search index.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! 1. Catalog     posts/**/index.html  →  Vec<Post>           (meta tags → records)
//! 2. Group       Vec<Post>            →  CategoryIndex       (slug → label + posts)
//! 3. Render      catalog + index      →  HTML pages          (Maud, shared shell)
//! 4. Emit        catalog + routes     →  sitemap.xml, search-index.json
//! ```
//!
//! The catalog is built once and only read afterwards. Nothing depends on
//! wall-clock time: the footer year is a [`types::BuildContext`] input, so a
//! rebuild of unchanged posts writes identical bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`meta`] | Reads `post:*` meta tags from a page with an HTML tokenizer |
//! | [`catalog`] | Walks the posts tree, validates metadata, sorts posts newest first |
//! | [`categories`] | Groups the catalog by category slug |
//! | [`pagination`] | Page math and the windowed page-number widget |
//! | [`render`] | Maud templates: page shell, cards, pills, every generated page |
//! | [`sitemap`] | Ordered, de-duplicated `sitemap.xml` |
//! | [`search`] | JSON search index |
//! | [`history`] | Last-modified dates and commit subjects from git, behind a trait |
//! | [`generate`] | Runs the pipeline and writes every artifact |
//! | [`byline`] | One-off migration adding author meta and bylines to post pages |
//! | [`news`] | News log page built from publishing commits and news posts |
//! | [`config`] | `postdex.toml` loading, merging over defaults, validation |
//! | [`types`] | Shared types: `Post`, `BuildContext`, `Routes` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## A Tokenizer, Not Regexes
//!
//! Post pages are read and patched through [`lol_html`] with CSS selectors.
//! Attribute order, quoting style, and self-closing syntax in the source
//! pages therefore do not matter, and the byline migration edits only the
//! bytes it inserts.
//!
//! ## Git as a Metadata Source
//!
//! Sitemap `lastmod` dates come from the last commit touching each file. The
//! [`history::History`] trait keeps git optional: `--no-git` and tests use
//! implementations that never spawn a process, and every git failure falls
//! back to the declared post date.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time and every interpolation is escaped.

pub mod byline;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod generate;
pub mod history;
pub mod meta;
pub mod news;
pub mod output;
pub mod pagination;
pub mod render;
pub mod search;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
