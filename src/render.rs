//! HTML rendering of the generated pages using Maud.
//!
//! Every generated document goes through [`Renderer::page_shell`], the shared
//! scaffold that post pages are also written against: head (title,
//! description, canonical link, analytics, stylesheet, theme bootstrap),
//! site header with navigation, the page body, and the footer.
//!
//! ## Pages
//!
//! | Route | Renderer |
//! |-------|----------|
//! | `/` | [`Renderer::home_page`] — hero, filter pills, "Top" and "Latest" grids |
//! | `/posts/`, `/posts/page/<n>/` | [`Renderer::listing_page`] — pills, card grid, pagination |
//! | `/categories/` | [`Renderer::categories_index`] — every category with its count |
//! | `/categories/<slug>/` | [`Renderer::category_page`] — the category's posts with dates |
//! | `/news/log/` | [`Renderer::news_log_page`] — news posts and publishing commits |
//!
//! Scripts are embedded as opaque text; the build never interprets them.
//! Everything else is interpolated through Maud and therefore HTML-escaped.

use crate::categories::{CategoryGroup, CategoryIndex};
use crate::config::SiteConfig;
use crate::news::NewsLog;
use crate::pagination::Paginator;
use crate::types::{BuildContext, Post, Routes};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLESHEET: &str = "/assets/css/site.css";
const SEARCH_PATH: &str = "/search/";
const SITEMAP_PATH: &str = "/sitemap.xml";

const THEME_BOOTSTRAP_JS: &str = r#"
    (function(){
      try{
        var t = localStorage.getItem('theme');
        if (t !== 'modern') document.documentElement.setAttribute('data-theme','retro');
      }catch(e){
        document.documentElement.setAttribute('data-theme','retro');
      }
    })();
"#;

const THEME_TOGGLE_JS: &str = r#"
    (function(){
      var btn = document.getElementById('themeToggle');
      if(!btn) return;
      function isRetro(){ return document.documentElement.getAttribute('data-theme') === 'retro'; }
      function render(){
        btn.textContent = isRetro() ? 'Style: 80/90s' : 'Style: Modern';
      }
      function setRetro(on){
        if(on){
          document.documentElement.setAttribute('data-theme','retro');
          try{ localStorage.removeItem('theme'); }catch(e){}
        }else{
          document.documentElement.removeAttribute('data-theme');
          try{ localStorage.setItem('theme','modern'); }catch(e){}
        }
        render();
      }
      render();
      btn.addEventListener('click', function(){ setRetro(!isRetro()); });
    })();
"#;

/// Head metadata of one generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    /// Absolute URL.
    pub canonical: String,
    pub description: Option<String>,
}

/// Heading level of a post card: `h2` in listings, `h3` under home page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHeading {
    H2,
    H3,
}

pub struct Renderer<'a> {
    config: &'a SiteConfig,
    ctx: BuildContext,
    routes: Routes,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a SiteConfig, ctx: BuildContext) -> Self {
        Self {
            config,
            ctx,
            routes: Routes::new(&config.paths),
        }
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// `base_url` + `path`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.config.site.base_url, path)
    }

    fn page_title(&self, prefix: &str) -> String {
        format!("{} — {}", prefix, self.config.site.name)
    }

    // =========================================================================
    // Shell
    // =========================================================================

    pub fn page_shell(&self, meta: &PageMeta, body: Markup) -> Markup {
        let site = &self.config.site;
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width,initial-scale=1";
                    title { (meta.title) }
                    @if let Some(description) = &meta.description {
                        meta name="description" content=(description);
                    }
                    link rel="canonical" href=(meta.canonical);
                    meta name="robots" content="index,follow";
                    @if !site.analytics_id.is_empty() {
                        script async src={ "https://www.googletagmanager.com/gtag/js?id=" (site.analytics_id) } {}
                        script { (PreEscaped(analytics_snippet(&site.analytics_id))) }
                    }
                    link rel="stylesheet" href=(STYLESHEET);
                    script { (PreEscaped(THEME_BOOTSTRAP_JS)) }
                }
                body {
                    div.wrap {
                        header.site {
                            div.brand { a href="/" { (site.name) } }
                            nav.small {
                                a href=(self.routes.listing()) { "Posts" }
                                a href=(self.routes.categories()) { "Categories" }
                                a href=(SEARCH_PATH) { "Search" }
                                button #themeToggle .theme-toggle type="button" aria-label="Switch site style" {
                                    "Style: 80/90s"
                                }
                            }
                        }
                        (body)
                        footer.small.muted {
                            div {
                                "© " (self.ctx.year) " " (site.name) " • "
                                a href=(SITEMAP_PATH) { "Sitemap" }
                            }
                            @if !site.disclosure.is_empty() {
                                div.muted { (site.disclosure) }
                            }
                        }
                    }
                    script { (PreEscaped(THEME_TOGGLE_JS)) }
                }
            }
        }
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    pub fn post_card(&self, post: &Post, heading: CardHeading) -> Markup {
        let link = html! { a href=(post.url_path) { (post.title) } };
        html! {
            article.post-card.card {
                @match heading {
                    CardHeading::H2 => h2.post-title { (link) },
                    CardHeading::H3 => h3.post-title { (link) },
                }
                div.post-meta {
                    time datetime=(post.date) { (post.date) }
                    " "
                    a.badge href=(self.routes.category(&post.category)) { (post.category_label) }
                }
            }
        }
    }

    /// Card grid, or a "No posts yet." placeholder card.
    pub fn posts_grid(&self, posts: &[Post], heading: CardHeading) -> Markup {
        html! {
            div.posts-grid {
                @for post in posts {
                    (self.post_card(post, heading))
                }
                @if posts.is_empty() {
                    div.card.muted { "No posts yet." }
                }
            }
        }
    }

    /// "All" pill pointing at `all_href`, then one pill per category.
    pub fn filter_pills(&self, all_href: &str, categories: &CategoryIndex<'_>) -> Markup {
        html! {
            div.pills {
                span.muted.small { "Filter:" }
                " "
                a.pill.active href=(all_href) { "All" }
                @for (slug, group) in categories.iter() {
                    " "
                    a.pill href=(self.routes.category(slug)) {
                        (group.label) " " span.muted { "(" (group.posts.len()) ")" }
                    }
                }
            }
        }
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Listing page `page` of the paginated post feed.
    pub fn listing_page(
        &self,
        page: usize,
        paginator: &Paginator,
        posts: &[Post],
        categories: &CategoryIndex<'_>,
    ) -> Markup {
        let title = if page > 1 {
            self.page_title(&format!("Posts (Page {})", page))
        } else {
            self.page_title("Posts")
        };
        let meta = PageMeta {
            title,
            canonical: self.absolute_url(&paginator.page_url(page)),
            description: Some(self.config.listing.listing_description.clone()),
        };
        let body = html! {
            main {
                h1 { "Posts" }
                p.muted { (self.config.listing.listing_description) }
                (self.filter_pills(self.routes.listing(), categories))
                (self.posts_grid(paginator.slice(posts, page), CardHeading::H2))
                (paginator.render_nav(page))
            }
        };
        self.page_shell(&meta, body)
    }

    /// Home page: the newest `top_count` posts, then the next `page_size`.
    pub fn home_page(&self, posts: &[Post], categories: &CategoryIndex<'_>) -> Markup {
        let listing = &self.config.listing;
        let top_end = listing.top_count.min(posts.len());
        let latest_end = (top_end + listing.page_size).min(posts.len());

        let meta = PageMeta {
            title: format!("{} — latest AI signal", self.config.site.name),
            canonical: self.absolute_url("/"),
            description: Some(listing.home_description.clone()),
        };
        let body = html! {
            main {
                section.hero {
                    h1 { "Latest AI signal" }
                    p.muted { (listing.home_description) }
                    div.hero-cta {
                        a.btn href=(self.routes.listing()) { "Browse all posts" }
                        " "
                        a.btn.secondary href=(self.routes.categories()) { "Browse categories" }
                    }
                }
                (self.filter_pills("/", categories))
                h2.section-title { "Top " (listing.top_count) }
                (self.posts_grid(&posts[..top_end], CardHeading::H3))
                h2.section-title { "Latest" }
                (self.posts_grid(&posts[top_end..latest_end], CardHeading::H3))
                p.muted.small { a href=(self.routes.listing()) { "See full feed →" } }
            }
        };
        self.page_shell(&meta, body)
    }

    pub fn categories_index(&self, categories: &CategoryIndex<'_>) -> Markup {
        let meta = PageMeta {
            title: self.page_title("Categories"),
            canonical: self.absolute_url(self.routes.categories()),
            description: Some("Browse posts by category.".to_string()),
        };
        let body = html! {
            main {
                h1 { "Categories" }
                div.card {
                    ul {
                        @for (slug, group) in categories.iter() {
                            li {
                                a href=(self.routes.category(slug)) { (group.label) }
                                " "
                                span.muted { "(" (group.posts.len()) ")" }
                            }
                        }
                        @if categories.is_empty() {
                            li.muted { "No categories yet." }
                        }
                    }
                }
            }
        };
        self.page_shell(&meta, body)
    }

    pub fn category_page(&self, slug: &str, group: &CategoryGroup<'_>) -> Markup {
        let meta = PageMeta {
            title: self.page_title(&group.label),
            canonical: self.absolute_url(&self.routes.category(slug)),
            description: Some(format!("Posts tagged {}.", group.label)),
        };
        let body = html! {
            main {
                h1 { (group.label) }
                div.card {
                    ul {
                        @for post in &group.posts {
                            li {
                                a href=(post.url_path) { (post.title) }
                                " "
                                span.muted { "— " (post.date) }
                            }
                        }
                    }
                }
            }
        };
        self.page_shell(&meta, body)
    }

    /// `/news/log/`: latest news posts and recent publishing commits.
    pub fn news_log_page(&self, log: &NewsLog<'_>, canonical_path: &str) -> Markup {
        let meta = PageMeta {
            title: self.page_title("News Log"),
            canonical: self.absolute_url(canonical_path),
            description: Some(
                "Operational log of recent news publishing and latest news posts.".to_string(),
            ),
        };
        let body = html! {
            main {
                h1 { "News log" }
                p.muted { "A simple audit page showing recent publishing activity." }

                h2 { "Latest news posts" }
                div.card {
                    ul {
                        @for post in &log.posts {
                            li {
                                a href=(post.url_path) { (post.title) }
                                " "
                                span.muted { "— " (post.lastmod) }
                            }
                        }
                        @if log.posts.is_empty() {
                            li.muted { "No news posts found." }
                        }
                    }
                }

                h2 { "Recent publishing commits" }
                div.card {
                    ul {
                        @for commit in &log.commits {
                            li {
                                span.muted { (crate::news::display_timestamp(&commit.timestamp)) }
                                " — "
                                (commit.subject)
                            }
                        }
                        @if log.commits.is_empty() {
                            li.muted { "No matching commits found." }
                        }
                    }
                }

                p.muted.small {
                    "Note: this is derived from repository history and may lag by a minute during deployments."
                }
            }
        };
        self.page_shell(&meta, body)
    }
}

fn analytics_snippet(id: &str) -> String {
    format!(
        "\n    window.dataLayer = window.dataLayer || [];\n    function gtag(){{dataLayer.push(arguments);}}\n    gtag('js', new Date());\n    gtag('config', '{}');\n",
        id.replace(['\'', '\\', '<'], "")
    )
}
