//! Search posts from the command line

use anyhow::Result;

use crate::config::TagMatching;
use crate::content::{Library, Post};
use crate::query::filter_posts;

/// Posts matching `query`, optionally restricted to posts carrying `tag`
///
/// `tag` is taken as typed (`Web Dev`, not the `web-dev` route key). The
/// keyword filter runs over the same newest-first list a page shows.
pub fn search<'a>(
    library: &'a Library,
    query: &str,
    tag: Option<&str>,
    mode: TagMatching,
) -> Vec<&'a Post> {
    match tag {
        Some(tag) => filter_posts(library.tagged(tag, mode), query),
        None => library.search(query),
    }
}

/// Print matching posts
pub fn run(library: &Library, query: &str, tag: Option<&str>, mode: TagMatching) -> Result<()> {
    let found = search(library, query, tag, mode);
    tracing::debug!("{} of {} posts match {:?}", found.len(), library.len(), query);

    if found.is_empty() {
        println!("포스트가 없습니다.");
        return Ok(());
    }

    for post in found {
        println!("  {} - {} ({})", post.date_string(), post.title, post.slug);
    }

    Ok(())
}
