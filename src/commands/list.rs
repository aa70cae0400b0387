//! List site content

use anyhow::Result;

use crate::content::Library;
use crate::Blog;

/// List posts (newest first) or tags (most used first)
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let library = blog.load()?;

    match content_type {
        "post" | "posts" => print!("{}", format_posts(&library)),
        "tag" | "tags" => print!("{}", format_tags(&library)),
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

fn format_posts(library: &Library) -> String {
    let mut out = format!("Posts ({}):\n", library.len());
    for post in library.sorted() {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            post.date_string(),
            post.title,
            post.source
        ));
    }
    out
}

fn format_tags(library: &Library) -> String {
    let tags = library.sorted_tags();
    let mut out = format!("Tags ({}):\n", tags.len());
    for tag in tags {
        out.push_str(&format!("  {} ({})\n", tag.name, tag.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::fixture;

    fn library() -> Library {
        Library::new(vec![
            fixture("old", "Old", "2023-05-01", "", &["Rust"]),
            fixture("new", "New", "2024-05-01", "", &["rust", "Web Dev"]),
        ])
    }

    #[test]
    fn test_format_posts_newest_first() {
        assert_eq!(
            format_posts(&library()),
            "Posts (2):\n  2024-05-01 - New [new.md]\n  2023-05-01 - Old [old.md]\n"
        );
    }

    #[test]
    fn test_format_tags_by_count() {
        assert_eq!(
            format_tags(&library()),
            "Tags (2):\n  rust (2)\n  web-dev (1)\n"
        );
    }
}
