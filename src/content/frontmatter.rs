//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::{ContentError, ContentResult};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec).map(Some)
}

/// Front-matter block of a post source file, as written
///
/// Every field is optional at this stage so a missing one can be reported by
/// name; [`FrontMatter::validate`] enforces the required set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
}

/// Validated front-matter: all required fields present and typed
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub date: NaiveDate,
    pub summary: String,
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(content: &'a str, path: &Path) -> ContentResult<(Self, &'a str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let missing = || ContentError::MissingFrontMatter {
            path: path.to_path_buf(),
        };

        let rest = content.strip_prefix("---").ok_or_else(missing)?;
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or_else(missing)?;

        // Closing delimiter may sit directly on the first line (empty block)
        let (yaml, remaining) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else {
            let end = rest.find("\n---").ok_or_else(missing)?;
            (&rest[..end], &rest[end + 4..])
        };
        let remaining = remaining.trim_start_matches([' ', '\t']);
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml).map_err(|source| {
            ContentError::InvalidFrontMatter {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok((fm, remaining))
    }

    /// Check required fields and parse the date
    pub fn validate(self, path: &Path) -> ContentResult<PostMeta> {
        let require = |field: &'static str| ContentError::MissingField {
            path: path.to_path_buf(),
            field,
        };

        let title = self.title.ok_or_else(|| require("title"))?;
        let raw_date = self.date.ok_or_else(|| require("date"))?;
        let summary = self.summary.ok_or_else(|| require("summary"))?;
        let tags = self.tags.ok_or_else(|| require("tags"))?;

        let date = parse_date_string(&raw_date).ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: raw_date.clone(),
        })?;

        Ok(PostMeta {
            title,
            date,
            summary,
            tags,
        })
    }
}

/// Parse a date string into a calendar date; any time component is dropped
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}
