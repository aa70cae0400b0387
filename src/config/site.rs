//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub header_title: String,
    pub author: String,
    pub repo: String,
    pub meta: MetaConfig,
    pub social: SocialConfig,
    pub giscus: GiscusConfig,
    pub profile: ProfileConfig,
    pub nav: Vec<NavLink>,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,
    pub blog_dir: String,
    pub tag_dir: String,

    // Listing
    pub recent_posts: usize,
    pub tag_matching: TagMatching,

    // Writing
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_title: "<dev.log/>;".to_string(),
            author: "John Doe".to_string(),
            repo: String::new(),
            meta: MetaConfig::default(),
            social: SocialConfig::default(),
            giscus: GiscusConfig::default(),
            profile: ProfileConfig::default(),
            nav: vec![
                NavLink {
                    title: "Blog".to_string(),
                    href: "/blog".to_string(),
                },
                NavLink {
                    title: "Tags".to_string(),
                    href: "/tags".to_string(),
                },
            ],

            content_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            tag_dir: "tags".to_string(),

            recent_posts: 5,
            tag_matching: TagMatching::default(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Page title with the site suffix, e.g. `Tags | <dev.log/>;`
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(t) if !t.is_empty() => format!("{} | {}", t, self.header_title),
            _ => self.meta.title.clone(),
        }
    }
}

/// SEO and Open Graph metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub url: String,
    pub title: String,
    pub description: String,
    pub locale: String,
    pub og_image: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4000".to_string(),
            title: "<dev.log/>;".to_string(),
            description: String::new(),
            locale: "ko_KR".to_string(),
            og_image: "/images/og_image.png".to_string(),
        }
    }
}

/// Links shown in the profile and footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub email: String,
    pub github: String,
    pub resume: String,
}

/// Giscus comment widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GiscusConfig {
    pub enable: bool,
    /// Owner of the discussion repository
    pub id: String,
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub lang: String,
}

impl Default for GiscusConfig {
    fn default() -> Self {
        Self {
            enable: false,
            id: String::new(),
            repo: String::new(),
            repo_id: String::new(),
            category: "General".to_string(),
            category_id: String::new(),
            lang: "ko".to_string(),
        }
    }
}

impl GiscusConfig {
    /// `owner/repo` as giscus expects it
    pub fn full_repo(&self) -> String {
        format!("{}/{}", self.id, self.repo)
    }
}

/// Home page profile block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub greeting: String,
    pub intro: String,
    pub notes_url: String,
    pub image: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            greeting: "안녕하세요!".to_string(),
            intro: String::new(),
            notes_url: String::new(),
            image: "/images/mimoji.png".to_string(),
        }
    }
}

/// A header navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

/// How a tag page selects its posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatching {
    /// Compare normalized forms, the same key the tag counts use
    #[default]
    Normalized,
    /// Compare the decoded route form against the authored tag, case-sensitively
    Literal,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.recent_posts, 5);
        assert_eq!(config.tag_matching, TagMatching::Normalized);
        assert_eq!(config.nav.len(), 2);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
header_title: "<dev.log/>;"
author: KIM YOUNG JIN
meta:
  url: https://youth-dev-log.vercel.app
  title: "youngzin's <dev.log/>;"
giscus:
  enable: true
  id: devyouth94
  repo: dev-blog
recent_posts: 3
tag_matching: literal
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.author, "KIM YOUNG JIN");
        assert_eq!(config.meta.url, "https://youth-dev-log.vercel.app");
        assert_eq!(config.meta.locale, "ko_KR");
        assert_eq!(config.giscus.full_repo(), "devyouth94/dev-blog");
        assert_eq!(config.giscus.category, "General");
        assert_eq!(config.recent_posts, 3);
        assert_eq!(config.tag_matching, TagMatching::Literal);
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_page_title() {
        let config = SiteConfig::default();
        assert_eq!(config.page_title(Some("Tags")), "Tags | <dev.log/>;");
        assert_eq!(config.page_title(None), config.meta.title);
    }
}
