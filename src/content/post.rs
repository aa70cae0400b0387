//! Post model

use chrono::NaiveDate;
use serde::Serialize;

use super::frontmatter::PostMeta;
use crate::helpers::date_iso;

/// A blog post
///
/// Built once per content load and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// One-line summary shown in listings
    pub summary: String,

    /// Post tags, as authored
    pub tags: Vec<String>,

    /// URL-friendly identifier, the source file name without extension
    pub slug: String,

    /// Rendered HTML body
    pub body: String,

    /// Source file path (relative to the content directory)
    pub source: String,

    /// Raw markdown body
    #[serde(skip)]
    pub raw: String,
}

impl Post {
    /// Create a post from validated front-matter
    pub fn new(meta: PostMeta, slug: String, source: String) -> Self {
        Self {
            title: meta.title,
            date: meta.date,
            summary: meta.summary,
            tags: meta.tags,
            slug,
            body: String::new(),
            source,
            raw: String::new(),
        }
    }

    /// Date as written in listings (`2024-01-15`)
    pub fn date_string(&self) -> String {
        date_iso(&self.date)
    }
}

/// Build a post in tests without touching the filesystem
#[cfg(test)]
pub(crate) fn fixture(slug: &str, title: &str, date: &str, summary: &str, tags: &[&str]) -> Post {
    let meta = PostMeta {
        title: title.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        summary: summary.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };
    Post::new(meta, slug.to_string(), format!("{}.md", slug))
}
