//! The loaded post collection

use indexmap::IndexMap;

use super::Post;
use crate::config::TagMatching;
use crate::query::{self, TagCount};

/// An immutable snapshot of every post from one content load
///
/// Reloading content produces a new `Library`; an existing one is never
/// patched in place.
#[derive(Debug, Clone, Default)]
pub struct Library {
    posts: Vec<Post>,
}

impl Library {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Posts in source order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, slug: &str) -> Option<&Post> {
        query::find_by_slug(&self.posts, slug)
    }

    /// All posts, newest first
    pub fn sorted(&self) -> Vec<&Post> {
        query::sort_by_date_desc(&self.posts)
    }

    pub fn recent(&self, limit: usize) -> Vec<&Post> {
        query::recent_posts(&self.posts, limit)
    }

    /// Newest-first posts matching a keyword
    pub fn search(&self, keyword: &str) -> Vec<&Post> {
        query::filter_posts(self.sorted(), keyword)
    }

    pub fn tag_counts(&self) -> IndexMap<String, usize> {
        query::aggregate_tags(&self.posts)
    }

    pub fn sorted_tags(&self) -> Vec<TagCount> {
        query::sorted_tag_counts(&self.posts)
    }

    /// Newest-first posts carrying a tag (decoded form, see [`query::posts_with_tag`])
    pub fn tagged(&self, tag: &str, mode: TagMatching) -> Vec<&Post> {
        query::posts_with_tag(self.sorted(), tag, mode)
    }
}
