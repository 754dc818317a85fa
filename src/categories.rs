//! Category index: the catalog grouped by category slug.

use crate::types::Post;
use std::collections::BTreeMap;

/// All posts sharing one category slug, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// Label of the first post seen with this slug.
    pub label: String,
    pub posts: Vec<&'a Post>,
}

/// Slug → group, iterated alphabetically by slug.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex<'a> {
    groups: BTreeMap<String, CategoryGroup<'a>>,
}

impl<'a> CategoryIndex<'a> {
    pub fn from_posts(posts: &'a [Post]) -> Self {
        let mut groups: BTreeMap<String, CategoryGroup<'a>> = BTreeMap::new();
        for post in posts {
            groups
                .entry(post.category.clone())
                .or_insert_with(|| CategoryGroup {
                    label: post.category_label.clone(),
                    posts: Vec::new(),
                })
                .posts
                .push(post);
        }
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryGroup<'a>)> {
        self.groups.iter().map(|(slug, group)| (slug.as_str(), group))
    }

    pub fn get(&self, slug: &str) -> Option<&CategoryGroup<'a>> {
        self.groups.get(slug)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
