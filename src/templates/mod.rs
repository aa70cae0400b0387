//! Built-in site theme using the Tera template engine
//!
//! Templates, stylesheet and script are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{parse_date_string, Post};
use crate::helpers::{self, full_date_ko, TocEntry};
use crate::query::{normalize_tag, searchable_text, tag_label, Route, TagCount};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("site/assets/style.css");

/// Script written to `js/main.js`
pub const SCRIPT: &str = include_str!("site/assets/main.js");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Values are escaped explicitly with `| escape`; URLs must stay as-is
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("tags.html", include_str!("site/tags.html")),
            ("tag.html", include_str!("site/tag.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/page_title.html",
                include_str!("site/partials/page_title.html"),
            ),
            (
                "partials/search.html",
                include_str!("site/partials/search.html"),
            ),
            ("partials/posts.html", include_str!("site/partials/posts.html")),
            ("partials/toc.html", include_str!("site/partials/toc.html")),
            (
                "partials/giscus.html",
                include_str!("site/partials/giscus.html"),
            ),
            (
                "partials/scroll_buttons.html",
                include_str!("site/partials/scroll_buttons.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("full_date", full_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: `2024-01-15` -> `2024년 1월 15일 월요일`
fn full_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("full_date", "value", String, value);
    match parse_date_string(&s) {
        Some(date) => Ok(tera::Value::String(full_date_ko(&date))),
        None => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

/// Site-wide values every page needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteData<'a> {
    pub header_title: &'a str,
    pub author: &'a str,
    pub repo: &'a str,
    pub meta: &'a crate::config::MetaConfig,
    pub social: &'a crate::config::SocialConfig,
    pub giscus: GiscusData,
    pub profile: &'a crate::config::ProfileConfig,
    pub nav: &'a [crate::config::NavLink],
    pub blog_path: String,
    pub tags_path: String,
    pub og_image: String,
}

impl<'a> SiteData<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            header_title: &config.header_title,
            author: &config.author,
            repo: &config.repo,
            meta: &config.meta,
            social: &config.social,
            giscus: GiscusData::new(config),
            profile: &config.profile,
            nav: &config.nav,
            blog_path: Route::Blog.path(config),
            tags_path: Route::Tags.path(config),
            og_image: helpers::full_url_for(config, &config.meta.og_image),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GiscusData {
    pub enable: bool,
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub lang: String,
}

impl GiscusData {
    fn new(config: &SiteConfig) -> Self {
        let giscus = &config.giscus;
        Self {
            enable: giscus.enable,
            repo: giscus.full_repo(),
            repo_id: giscus.repo_id.clone(),
            category: giscus.category.clone(),
            category_id: giscus.category_id.clone(),
            lang: giscus.lang.clone(),
        }
    }
}

/// Per-page SEO values
#[derive(Debug, Clone, Serialize)]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_type: &'static str,
}

impl SeoData {
    pub fn new(config: &SiteConfig, title: Option<&str>, description: &str, route: &Route) -> Self {
        let description = if description.is_empty() {
            config.meta.description.clone()
        } else {
            description.to_string()
        };
        Self {
            title: config.page_title(title),
            description,
            canonical: helpers::full_url_for(config, &route.path(config)),
            og_type: match route {
                Route::Post(_) => "article",
                _ => "website",
            },
        }
    }
}

/// A tag chip linking to its listing page
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    /// Authored tag with spaces turned into hyphens
    pub name: String,
    pub path: String,
}

impl TagLink {
    pub fn new(tag: &str, config: &SiteConfig) -> Self {
        Self {
            name: tag.split_whitespace().collect::<Vec<_>>().join("-"),
            path: Route::tag(tag).path(config),
        }
    }
}

/// A post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub summary: String,
    pub path: String,
    pub tags: Vec<TagLink>,
    /// Lower-cased keyword search haystack for the client-side filter
    pub search: String,
}

impl PostCard {
    pub fn new(post: &Post, config: &SiteConfig) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date_string(),
            summary: post.summary.clone(),
            path: Route::Post(post.slug.clone()).path(config),
            tags: post
                .tags
                .iter()
                .filter(|t| !normalize_tag(t).is_empty())
                .map(|t| TagLink::new(t, config))
                .collect(),
            search: searchable_text(post),
        }
    }
}

/// A full post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    #[serde(flatten)]
    pub card: PostCard,
    pub body: String,
    pub toc: Vec<TocEntry>,
}

/// A tag with its post count
#[derive(Debug, Clone, Serialize)]
pub struct TagData {
    pub name: String,
    pub label: String,
    pub count: usize,
    pub path: String,
}

impl TagData {
    pub fn new(tag: &TagCount, config: &SiteConfig) -> Self {
        Self {
            name: tag.name.clone(),
            label: tag_label(&tag.name),
            count: tag.count,
            path: Route::Tag(tag.name.clone()).path(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::fixture;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_full_date_filter() {
        let out = full_date_filter(&tera::Value::from("2024-01-15"), &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::from("2024년 1월 15일 월요일"));

        let out = full_date_filter(&tera::Value::from("soon"), &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::from("soon"));
    }

    #[test]
    fn test_post_card() {
        let config = SiteConfig::default();
        let post = fixture("hooks", "React Hooks", "2024-01-15", "State", &["Web Dev", " "]);
        let card = PostCard::new(&post, &config);
        assert_eq!(card.path, "/blog/hooks/");
        assert_eq!(card.tags.len(), 1);
        assert_eq!(card.tags[0].name, "Web-Dev");
        assert_eq!(card.tags[0].path, "/tags/web-dev/");
        assert_eq!(card.search, "react hooks state web dev  ");
    }

    #[test]
    fn test_seo_data() {
        let config = SiteConfig::default();
        let seo = SeoData::new(&config, Some("Tags"), "", &Route::Tags);
        assert_eq!(seo.title, "Tags | <dev.log/>;");
        assert_eq!(seo.canonical, "http://localhost:4000/tags/");
        assert_eq!(seo.og_type, "website");
    }
}
