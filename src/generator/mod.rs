//! Generator module - renders the library into static HTML with the embedded templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{Library, Post};
use crate::helpers::toc;
use crate::query::Route;
use crate::templates::{
    PostCard, PostPage, SeoData, SiteData, TagData, TemplateRenderer, SCRIPT, STYLESHEET,
};
use crate::Blog;

/// Headings deeper than this are left out of the table of contents
const TOC_DEPTH: u8 = 3;

/// Static site generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, library: &Library) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        self.write_assets()?;
        self.copy_static_files()?;

        self.generate_home(library)?;
        self.generate_blog(library)?;
        self.generate_post_pages(library)?;
        self.generate_tags_page(library)?;
        self.generate_tag_pages(library)?;
        self.generate_not_found()?;

        Ok(())
    }

    /// Create a base context with common variables
    fn create_base_context(
        &self,
        route: &Route,
        title: Option<&str>,
        description: &str,
    ) -> Context {
        let config = &self.blog.config;
        let mut context = Context::new();
        context.insert("site", &SiteData::new(config));
        context.insert("seo", &SeoData::new(config, title, description, route));
        context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("current_path", &route.path(config));
        context
    }

    /// Render a template and write it to the route's output file
    fn write_page(&self, route: &Route, template: &str, context: &Context) -> Result<()> {
        let html = self
            .renderer
            .render(template, context)
            .with_context(|| format!("Failed to render {} for {:?}", template, route))?;
        let output_path = self
            .blog
            .public_dir
            .join(route.output_file(&self.blog.config));
        write_file(&output_path, &html)
    }

    fn cards(&self, posts: &[&Post]) -> Vec<PostCard> {
        posts
            .iter()
            .map(|p| PostCard::new(p, &self.blog.config))
            .collect()
    }

    /// Home page: profile and the most recent posts
    fn generate_home(&self, library: &Library) -> Result<()> {
        let route = Route::Home;
        let posts = library.recent(self.blog.config.recent_posts);

        let mut context = self.create_base_context(&route, None, "");
        context.insert("page_title", "Recent Post");
        context.insert("page_desc", "");
        context.insert("posts", &self.cards(&posts));

        self.write_page(&route, "index.html", &context)
    }

    /// Full listing, newest first, with the keyword search box
    fn generate_blog(&self, library: &Library) -> Result<()> {
        let route = Route::Blog;
        let posts = library.sorted();

        let mut context = self.create_base_context(&route, Some("Blog"), "");
        context.insert("page_title", "Blog");
        context.insert("page_desc", "개발 관련 공유하고 싶은 내용을 포스팅합니다.");
        context.insert("posts", &self.cards(&posts));

        self.write_page(&route, "blog.html", &context)
    }

    /// One page per post
    fn generate_post_pages(&self, library: &Library) -> Result<()> {
        for post in library.posts() {
            let route = Route::Post(post.slug.clone());
            let page = PostPage {
                card: PostCard::new(post, &self.blog.config),
                body: post.body.clone(),
                toc: toc(&post.body, TOC_DEPTH),
            };

            let mut context =
                self.create_base_context(&route, Some(post.title.as_str()), &post.summary);
            context.insert("post", &page);

            self.write_page(&route, "post.html", &context)?;
        }

        tracing::info!("Rendered {} post pages", library.len());
        Ok(())
    }

    /// Tag cloud with post counts
    fn generate_tags_page(&self, library: &Library) -> Result<()> {
        let route = Route::Tags;
        let tags: Vec<TagData> = library
            .sorted_tags()
            .iter()
            .map(|t| TagData::new(t, &self.blog.config))
            .collect();

        let mut context = self.create_base_context(&route, Some("Tags"), "");
        context.insert("page_title", "Tags");
        context.insert("page_desc", "포스트를 태그별로 확인하세요.");
        context.insert("tags", &tags);

        self.write_page(&route, "tags.html", &context)
    }

    /// One listing page per aggregated tag key
    fn generate_tag_pages(&self, library: &Library) -> Result<()> {
        let mode = self.blog.config.tag_matching;
        let tags = library.sorted_tags();

        for tag in &tags {
            let data = TagData::new(tag, &self.blog.config);
            let route = Route::Tag(tag.name.clone());
            let posts = library.tagged(&data.label, mode);
            if posts.is_empty() {
                tracing::debug!("Tag {:?} lists no posts in {:?} mode", tag.name, mode);
            }

            let description = format!("키워드 {}를 포함한 포스트 목록입니다.", data.label);
            let mut context =
                self.create_base_context(&route, Some(data.label.as_str()), &description);
            context.insert("page_title", &data.label);
            context.insert("page_desc", "태그를 포함한 포스트입니다.");
            context.insert("tag", &data);
            context.insert("posts", &self.cards(&posts));

            self.write_page(&route, "tag.html", &context)?;
        }

        tracing::info!("Rendered {} tag pages", tags.len());
        Ok(())
    }

    fn generate_not_found(&self) -> Result<()> {
        let route = Route::Home;
        let mut context = self.create_base_context(&route, Some("404"), "");
        context.insert("page_title", "404");
        context.insert("page_desc", "페이지를 찾을 수 없습니다.");

        let html = self.renderer.render("404.html", &context)?;
        write_file(&self.blog.public_dir.join("404.html"), &html)
    }

    /// Write the embedded stylesheet and script
    fn write_assets(&self) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        write_file(&public_dir.join("css/style.css"), STYLESHEET)?;
        write_file(&public_dir.join("js/main.js"), SCRIPT)
    }

    /// Copy the static directory (images, favicon, ...) verbatim
    fn copy_static_files(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::post::fixture;

    fn build(dir: &Path, posts: Vec<Post>) -> Blog {
        let blog = Blog::with_config(dir.to_path_buf(), SiteConfig::default());
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&Library::new(posts)).unwrap();
        blog
    }

    fn read(blog: &Blog, rel: &str) -> String {
        fs::read_to_string(blog.public_dir.join(rel)).unwrap()
    }

    #[test]
    fn test_generate_tree() {
        let dir = tempfile::tempdir().unwrap();
        let mut post = fixture("hooks", "React Hooks", "2024-01-15", "State", &["Web Dev"]);
        post.body = r#"<h2 id="intro">Intro</h2><p>Hi</p>"#.to_string();
        let blog = build(dir.path(), vec![post]);

        for rel in [
            "index.html",
            "blog/index.html",
            "blog/hooks/index.html",
            "tags/index.html",
            "tags/web-dev/index.html",
            "404.html",
            "css/style.css",
            "js/main.js",
        ] {
            assert!(blog.public_dir.join(rel).exists(), "missing {}", rel);
        }

        let page = read(&blog, "blog/hooks/index.html");
        assert!(page.contains("2024년 1월 15일 월요일"));
        assert!(page.contains(r##"href="#intro""##));
        assert!(page.contains("<title>React Hooks | "));

        let tag_page = read(&blog, "tags/web-dev/index.html");
        assert!(tag_page.contains("<h1>web dev</h1>"));
        assert!(tag_page.contains("/blog/hooks/"));
    }

    #[test]
    fn test_home_limits_recent_posts() {
        let dir = tempfile::tempdir().unwrap();
        let posts = (1..=7)
            .map(|i| {
                let slug = format!("post-{}", i);
                let date = format!("2024-01-0{}", i);
                fixture(&slug, &slug, &date, "s", &[])
            })
            .collect();
        let blog = build(dir.path(), posts);

        let home = read(&blog, "index.html");
        assert_eq!(home.matches("class=\"post-card\"").count(), 5);
        assert!(home.contains("/blog/post-7/"));
        assert!(!home.contains("/blog/post-2/"));

        let listing = read(&blog, "blog/index.html");
        assert_eq!(listing.matches("class=\"post-card\"").count(), 7);
    }

    #[test]
    fn test_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let blog = build(dir.path(), Vec::new());

        let listing = read(&blog, "blog/index.html");
        assert!(listing.contains("포스트가 없습니다."));
        assert!(listing.contains(r#"class="posts-empty" data-posts-empty>"#));
    }

    #[test]
    fn test_static_files_copied() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/images")).unwrap();
        fs::write(dir.path().join("static/images/me.png"), b"png").unwrap();
        let blog = build(dir.path(), Vec::new());

        assert_eq!(fs::read(blog.public_dir.join("images/me.png")).unwrap(), b"png");
    }
}
