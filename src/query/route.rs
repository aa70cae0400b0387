//! Route table: slugs and tags to page paths and back

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::PathBuf;

use super::tags::normalize_tag;
use crate::config::SiteConfig;
use crate::content::Post;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters that cannot appear inside one file name
const FILE_NAME: &AsciiSet = &CONTROLS.add(b'%').add(b'/').add(b'\\');

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blog,
    Post(String),
    Tags,
    /// Tag listing, keyed by the normalized tag
    Tag(String),
}

impl Route {
    /// Route of the listing page for an authored tag
    pub fn tag(tag: &str) -> Self {
        Route::Tag(normalize_tag(tag))
    }

    /// URL path, always with a trailing slash
    ///
    /// The item segment is the URL-encoded file name, so a host that decodes
    /// the request once lands on [`Route::output_file`].
    pub fn path(&self, config: &SiteConfig) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => format!("/{}/", config.blog_dir),
            Route::Post(slug) => format!(
                "/{}/{}/",
                config.blog_dir,
                encode_segment(&file_segment(slug))
            ),
            Route::Tags => format!("/{}/", config.tag_dir),
            Route::Tag(key) => format!(
                "/{}/{}/",
                config.tag_dir,
                encode_segment(&file_segment(key))
            ),
        }
    }

    /// Output file relative to the public directory
    ///
    /// Always one directory below its section: separators and dot segments
    /// in a slug or tag are escaped, never followed.
    pub fn output_file(&self, config: &SiteConfig) -> PathBuf {
        let dir = match self {
            Route::Home => PathBuf::new(),
            Route::Blog => PathBuf::from(&config.blog_dir),
            Route::Post(slug) => PathBuf::from(&config.blog_dir).join(file_segment(slug)),
            Route::Tags => PathBuf::from(&config.tag_dir),
            Route::Tag(key) => PathBuf::from(&config.tag_dir).join(file_segment(key)),
        };
        dir.join("index.html")
    }

    /// Resolve a request path to a route
    pub fn resolve(path: &str, config: &SiteConfig) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let trimmed = trimmed.strip_suffix("/index.html").unwrap_or(trimmed);
        if trimmed.is_empty() || trimmed == "index.html" {
            return Some(Route::Home);
        }

        let mut parts = trimmed.split('/');
        let section = decode(parts.next()?)?;
        let item = match parts.next() {
            Some(raw) => Some(decode(&decode(raw)?)?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }

        match item {
            None if section == config.blog_dir => Some(Route::Blog),
            None if section == config.tag_dir => Some(Route::Tags),
            Some(slug) if section == config.blog_dir && !slug.is_empty() => {
                Some(Route::Post(slug))
            }
            Some(tag) if section == config.tag_dir && !tag.is_empty() => Some(Route::Tag(tag)),
            _ => None,
        }
    }
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// File name for a slug or tag key
///
/// `%`, `/` and `\` are percent-encoded and `.`/`..` become `%2E`/`%2E%2E`;
/// anything else, including non-ASCII text, is kept as written.
pub fn file_segment(segment: &str) -> String {
    match segment {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => utf8_percent_encode(segment, FILE_NAME).to_string(),
    }
}

fn decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Look up a post by slug
pub fn find_by_slug<'a, I>(posts: I, slug: &str) -> Option<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts.into_iter().find(|post| post.slug == slug)
}
