//! Content loader - loads posts from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Library, MarkdownRenderer, Post};
use crate::error::{ContentError, ContentResult};
use crate::Blog;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer = MarkdownRenderer::with_options(&blog.config.highlight);
        Self { blog, renderer }
    }

    /// Load every post into a fresh library
    ///
    /// Posts keep source order (file paths sorted by name); the first bad
    /// file aborts the load.
    pub fn load(&self) -> ContentResult<Library> {
        Ok(Library::new(self.load_posts()?))
    }

    /// Load all posts from the content directory
    pub fn load_posts(&self) -> ContentResult<Vec<Post>> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = entry.map_err(|e| ContentError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_default(),
                source: e.into(),
            })?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if !is_post_file(path) {
                tracing::warn!("Skipping non-post file {:?}", path);
                continue;
            }

            let post = self.load_post(path)?;

            if let Some(first) = seen.get(&post.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(post.slug.clone(), path.to_path_buf());

            tracing::debug!("Loaded post {:?} ({})", post.slug, post.date);
            posts.push(post);
        }

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> ContentResult<Post> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&content, path)?;
        let meta = fm.validate(path)?;

        let slug = slug_from_path(path).ok_or_else(|| ContentError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

        let source = path
            .strip_prefix(&self.blog.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(meta, slug, source);
        post.raw = body.to_string();
        post.body = self.renderer.render(body);

        Ok(post)
    }
}

/// Slug of a source file: its name without the extension
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Check if a file is a post source
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}
