//! Keyword filter over titles, summaries and tags

use crate::content::Post;

/// Lower-cased `title summary tag1 tag2 ...` used for keyword matching
pub fn searchable_text(post: &Post) -> String {
    format!("{} {} {}", post.title, post.summary, post.tags.join(" ")).to_lowercase()
}

/// Normalize a raw search box value
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Posts whose searchable text contains `query`, case-insensitively
///
/// Plain substring containment; an empty query keeps every post. Input
/// order is preserved.
pub fn filter_posts<'a, I>(posts: I, query: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let query = normalize_query(query);
    posts
        .into_iter()
        .filter(|post| query.is_empty() || searchable_text(post).contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::fixture;
    use proptest::prelude::*;

    fn posts() -> Vec<Post> {
        vec![
            fixture("hooks", "React Hooks", "2024-01-01", "useState basics", &["React"]),
            fixture("grid", "CSS Grid", "2024-02-01", "layout tricks", &["css", "Web Dev"]),
            fixture("rebase", "Git Rebase", "2024-03-01", "history rewriting", &["git"]),
        ]
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_searchable_text_order() {
        let post = fixture("x", "Title", "2024-01-01", "Summary", &["One", "Two"]);
        assert_eq!(searchable_text(&post), "title summary one two");
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let posts = posts();
        assert_eq!(slugs(filter_posts(&posts, "")), vec!["hooks", "grid", "rebase"]);
        assert_eq!(slugs(filter_posts(&posts, "   ")), vec!["hooks", "grid", "rebase"]);
    }

    #[test]
    fn test_matches_title_summary_and_tags() {
        let posts = posts();
        assert_eq!(slugs(filter_posts(&posts, "REACT")), vec!["hooks"]);
        assert_eq!(slugs(filter_posts(&posts, "layout")), vec!["grid"]);
        assert_eq!(slugs(filter_posts(&posts, "web dev")), vec!["grid"]);
        assert_eq!(slugs(filter_posts(&posts, "  Git ")), vec!["rebase"]);
    }

    #[test]
    fn test_match_spans_field_boundary() {
        let posts = posts();
        // title "css grid" followed by summary "layout"
        assert_eq!(slugs(filter_posts(&posts, "grid layout")), vec!["grid"]);
    }

    #[test]
    fn test_no_match() {
        let posts = posts();
        assert!(filter_posts(&posts, "kubernetes").is_empty());
    }

    #[test]
    fn test_single_letter_scenario() {
        let posts = vec![
            fixture("a", "A", "2024-01-01", "x", &["Web Dev"]),
            fixture("b", "B", "2024-02-01", "y", &["web-dev"]),
        ];
        // only the first title holds an "a"; summaries and tags have none
        assert_eq!(slugs(filter_posts(&posts, "a")), vec!["a"]);
    }

    prop_compose! {
        fn arb_post()(title in "[a-zA-Z ]{0,12}", summary in "[a-zA-Z ]{0,20}",
                      tags in prop::collection::vec("[a-zA-Z]{1,6}", 0..3)) -> Post {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            fixture("p", &title, "2024-01-01", &summary, &tags)
        }
    }

    proptest! {
        #[test]
        fn prop_empty_query_is_identity(posts in prop::collection::vec(arb_post(), 0..10)) {
            let filtered = filter_posts(&posts, "");
            prop_assert_eq!(filtered.len(), posts.len());
            for (a, b) in filtered.iter().zip(posts.iter()) {
                prop_assert!(std::ptr::eq(*a, b));
            }
        }

        #[test]
        fn prop_filter_is_exact(posts in prop::collection::vec(arb_post(), 0..10), q in "[a-zA-Z]{0,3}") {
            let filtered = filter_posts(&posts, &q);
            let needle = q.to_lowercase();
            for post in &posts {
                let kept = filtered.iter().any(|p| std::ptr::eq(*p, post));
                prop_assert_eq!(kept, searchable_text(post).contains(&needle));
            }
        }
    }
}
