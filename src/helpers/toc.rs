//! Table of contents extraction

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::html::strip_html;

lazy_static! {
    static ref HEADING: Regex =
        Regex::new(r#"(?s)<h([1-6]) id="([^"]*)">(.*?)</h[1-6]>"#).expect("valid heading regex");
}

/// One heading of a rendered post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Headings down to `max_depth` from rendered HTML, in document order
///
/// Only headings carrying an `id` are listed, since the entries link to them.
pub fn toc(content: &str, max_depth: u8) -> Vec<TocEntry> {
    HEADING
        .captures_iter(content)
        .filter_map(|cap| {
            let level: u8 = cap[1].parse().ok()?;
            if level > max_depth {
                return None;
            }
            Some(TocEntry {
                level,
                id: cap[2].to_string(),
                text: strip_html(&cap[3]),
            })
        })
        .collect()
}
