//! Content module - handles posts and content processing

mod frontmatter;
mod library;
pub mod loader;
mod markdown;
pub(crate) mod post;

pub use frontmatter::{parse_date_string, FrontMatter, PostMeta};
pub use library::Library;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::Post;
