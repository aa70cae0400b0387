//! Read-only queries over a set of posts
//!
//! Every function here is pure: it borrows the posts it is given and returns
//! a new collection of references, never reordering or mutating the input.

mod listing;
mod route;
mod search;
mod tags;

pub use listing::{recent_posts, sort_by_date_desc};
pub use route::{encode_segment, file_segment, find_by_slug, Route};
pub use search::{filter_posts, normalize_query, searchable_text};
pub use tags::{
    aggregate_tags, normalize_tag, posts_with_tag, sorted_tag_counts, tag_label, TagCount,
};
