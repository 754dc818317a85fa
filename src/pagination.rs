//! Pagination of the post listing.
//!
//! The listing is split into fixed-size pages. Page 1 lives at the listing
//! root (`/posts/`), page `n >= 2` at `/posts/page/<n>/`. There is always at
//! least one page, so an empty catalog still gets a "No posts yet." listing.
//!
//! The navigation widget shows Prev/Next links, the first and last page, and
//! a window of two pages either side of the current one. Gaps in the sequence
//! collapse to an ellipsis:
//!
//! ```text
//! current = 5 of 10:   Prev 1 … 3 4 [5] 6 7 … 10 Next
//! current = 1 of 3:    [1] 2 3 Next
//! ```

use maud::{Markup, html};
use std::ops::Range;

/// Pages either side of the current one that are always linked.
pub const WINDOW: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total_items: usize,
    total_pages: usize,
    listing_path: String,
}

/// One element of the navigation widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Prev(usize),
    Page(usize),
    Current(usize),
    Gap,
    Next(usize),
}

impl Paginator {
    /// `listing_path` is the URL of page 1, e.g. `/posts/`.
    pub fn new(total_items: usize, page_size: usize, listing_path: impl Into<String>) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size).max(1),
            listing_path: listing_path.into(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Page numbers `1..=total_pages`.
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// Item indices shown on `page`. Empty for pages past the end.
    pub fn range(&self, page: usize) -> Range<usize> {
        let start = (page.saturating_sub(1) * self.page_size).min(self.total_items);
        let end = (page * self.page_size).min(self.total_items);
        start..end.max(start)
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let range = self.range(page);
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    pub fn page_url(&self, n: usize) -> String {
        if n <= 1 {
            self.listing_path.clone()
        } else {
            format!("{}page/{}/", self.listing_path, n)
        }
    }

    /// Navigation model for `current`. Empty when there is a single page.
    pub fn nav_items(&self, current: usize) -> Vec<NavItem> {
        if self.total_pages <= 1 {
            return Vec::new();
        }
        let current = current.clamp(1, self.total_pages);
        let mut items = Vec::new();

        if current > 1 {
            items.push(NavItem::Prev(current - 1));
        }

        let mut numbers = vec![1, self.total_pages];
        let low = current.saturating_sub(WINDOW).max(1);
        let high = (current + WINDOW).min(self.total_pages);
        numbers.extend(low..=high);
        numbers.sort_unstable();
        numbers.dedup();

        let mut last = None;
        for n in numbers {
            if last.is_some_and(|prev| n - prev > 1) {
                items.push(NavItem::Gap);
            }
            items.push(if n == current {
                NavItem::Current(n)
            } else {
                NavItem::Page(n)
            });
            last = Some(n);
        }

        if current < self.total_pages {
            items.push(NavItem::Next(current + 1));
        }
        items
    }

    /// The `<nav class="pagination">` widget, or nothing for a single page.
    pub fn render_nav(&self, current: usize) -> Markup {
        let items = self.nav_items(current);
        if items.is_empty() {
            return html! {};
        }
        html! {
            nav.pagination aria-label="Posts pagination" {
                @for item in items {
                    @match item {
                        NavItem::Prev(n) => { a.page href=(self.page_url(n)) rel="prev" { "Prev" } }
                        NavItem::Page(n) => { a.page href=(self.page_url(n)) { (n) } }
                        NavItem::Current(n) => { span.page.current aria-current="page" { (n) } }
                        NavItem::Gap => { span.dots { "…" } }
                        NavItem::Next(n) => { a.page href=(self.page_url(n)) rel="next" { "Next" } }
                    }
                }
            }
        }
    }
}
