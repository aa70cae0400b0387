//! Date-ordered listings

use crate::content::Post;

/// Posts sorted newest first
///
/// The sort is stable: posts sharing a date keep their source order.
pub fn sort_by_date_desc<'a, I>(posts: I) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The `limit` most recent posts (sorted first, then truncated)
pub fn recent_posts<'a, I>(posts: I, limit: usize) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut sorted = sort_by_date_desc(posts);
    sorted.truncate(limit);
    sorted
}
