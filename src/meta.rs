//! Post metadata extraction from rendered HTML.
//!
//! Every post page carries its metadata in `<meta>` tags:
//!
//! ```html
//! <meta name="post:title" content="Prompt injection in CI agents" />
//! <meta name="post:date" content="2026-01-14" />
//! <meta name="post:category" content="security" />
//! <meta name="post:categoryLabel" content="Security" />
//! ```
//!
//! Pages are tokenized with [`lol_html`] and matched with a `meta[name]`
//! selector, so attribute order, quoting style, and self-closing versus open
//! tag syntax do not matter. The `name` comparison is ASCII case-insensitive.
//! The first tag with a non-empty `content` wins.

use lol_html::errors::RewritingError;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use thiserror::Error;

pub const TITLE: &str = "post:title";
pub const DATE: &str = "post:date";
pub const CATEGORY: &str = "post:category";
pub const CATEGORY_LABEL: &str = "post:categoryLabel";
pub const AUTHOR: &str = "post:author";

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("HTML tokenizer error: {0}")]
    Rewrite(#[from] RewritingError),
}

/// The four post fields, each absent when its tag is missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub category_label: Option<String>,
}

impl PostMeta {
    /// Read all post fields in a single pass over `html`.
    pub fn from_html(html: &str) -> Result<Self, MetaError> {
        let [title, date, category, category_label] =
            find_meta(html, [TITLE, DATE, CATEGORY, CATEGORY_LABEL])?;
        Ok(Self {
            title,
            date,
            category,
            category_label,
        })
    }
}

pub fn extract_post_meta(html: &str) -> Result<PostMeta, MetaError> {
    PostMeta::from_html(html)
}

/// Return the trimmed `content` of the first `<meta name="{name}">` tag.
///
/// `None` when the tag is absent, has no `content`, has only whitespace, or
/// the page cannot be tokenized.
pub fn extract(html: &str, name: &str) -> Option<String> {
    let [value] = find_meta(html, [name]).ok()?;
    value
}

/// Look up several meta names at once. Results are in the order of `names`.
pub fn find_meta<const N: usize>(
    html: &str,
    names: [&str; N],
) -> Result<[Option<String>; N], MetaError> {
    let mut found: [Option<String>; N] = std::array::from_fn(|_| None);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("meta[name]", |el| {
                let Some(name) = el.get_attribute("name") else {
                    return Ok(());
                };
                let Some(slot) = names
                    .iter()
                    .position(|wanted| wanted.eq_ignore_ascii_case(name.trim()))
                else {
                    return Ok(());
                };
                if found[slot].is_some() {
                    return Ok(());
                }
                if let Some(content) = el.get_attribute("content") {
                    let value = decode_entities(content.trim());
                    if !value.is_empty() {
                        found[slot] = Some(value);
                    }
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(found)
}

/// Decode every HTML character reference in an attribute value: named
/// (`&mdash;`), decimal (`&#8217;`) and hex (`&#x2014;`).
///
/// Single pass, so `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn decode_entities(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="post:title" content="  Prompt injection in CI agents " />
  <meta name="post:date" content="2026-01-14">
  <meta name="post:category" content="security" />
  <meta name="post:categoryLabel" content="Security" />
</head>
<body><h1>Prompt injection in CI agents</h1></body>
</html>"#;

    #[test]
    fn extracts_all_fields() {
        let meta = PostMeta::from_html(PAGE).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Prompt injection in CI agents"));
        assert_eq!(meta.date.as_deref(), Some("2026-01-14"));
        assert_eq!(meta.category.as_deref(), Some("security"));
        assert_eq!(meta.category_label.as_deref(), Some("Security"));
    }

    #[test]
    fn value_is_trimmed() {
        assert_eq!(
            extract(PAGE, TITLE).as_deref(),
            Some("Prompt injection in CI agents")
        );
    }

    #[test]
    fn open_and_self_closing_tags_both_match() {
        // post:date uses `>` and post:category uses `/>` in PAGE
        assert!(extract(PAGE, DATE).is_some());
        assert!(extract(PAGE, CATEGORY).is_some());
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let html = r#"<meta name="POST:Title" content="Loud">"#;
        assert_eq!(extract(html, TITLE).as_deref(), Some("Loud"));
    }

    #[test]
    fn content_before_name_is_accepted() {
        let html = r#"<meta content="Swapped" name="post:title" />"#;
        assert_eq!(extract(html, TITLE).as_deref(), Some("Swapped"));
    }

    #[test]
    fn single_quotes_are_accepted() {
        let html = r#"<meta name='post:title' content='Quoted'>"#;
        assert_eq!(extract(html, TITLE).as_deref(), Some("Quoted"));
    }

    #[test]
    fn missing_tag_is_none() {
        assert_eq!(extract(PAGE, AUTHOR), None);
        assert_eq!(extract("<p>no head</p>", TITLE), None);
    }

    #[test]
    fn missing_content_is_none() {
        let html = r#"<meta name="post:title">"#;
        assert_eq!(extract(html, TITLE), None);
    }

    #[test]
    fn blank_content_is_none() {
        let html = r#"<meta name="post:title" content="   ">"#;
        assert_eq!(extract(html, TITLE), None);
    }

    #[test]
    fn first_non_empty_tag_wins() {
        let html = r#"
<meta name="post:title" content="">
<meta name="post:title" content="First">
<meta name="post:title" content="Second">"#;
        assert_eq!(extract(html, TITLE).as_deref(), Some("First"));
    }

    #[test]
    fn category_does_not_match_category_label() {
        let html = r#"<meta name="post:categoryLabel" content="Security">"#;
        assert_eq!(extract(html, CATEGORY), None);
        assert_eq!(extract(html, CATEGORY_LABEL).as_deref(), Some("Security"));
    }

    #[test]
    fn apostrophe_in_double_quoted_content() {
        let html = r#"<meta name="post:title" content="What's new">"#;
        assert_eq!(extract(html, TITLE).as_deref(), Some("What's new"));
    }

    #[test]
    fn entities_are_decoded() {
        let html = r#"<meta name="post:title" content="AI &amp; Security &lt;2026&gt;">"#;
        assert_eq!(
            extract(html, TITLE).as_deref(),
            Some("AI & Security <2026>")
        );
    }

    #[test]
    fn numeric_and_named_references_are_decoded() {
        let html = r#"<meta name="post:title" content="It&#8217;s here &mdash; now &#x2014; really">"#;
        assert_eq!(
            extract(html, TITLE).as_deref(),
            Some("It\u{2019}s here \u{2014} now \u{2014} really")
        );
    }

    #[test]
    fn decode_entities_does_not_double_decode() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn missing_fields_are_none_in_post_meta() {
        let html = r#"<meta name="post:title" content="Only a title">"#;
        let meta = PostMeta::from_html(html).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Only a title"));
        assert_eq!(meta.date, None);
        assert_eq!(meta.category, None);
        assert_eq!(meta.category_label, None);
    }
}
