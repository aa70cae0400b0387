//! Tag aggregation and tag-filtered listings

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::TagMatching;
use crate::content::Post;

/// Normalize a tag to its route/counting key
///
/// Whitespace runs become a single `-` and the result is lower-cased, so
/// `"Web Dev"`, `"web  dev"` and `"web-dev"` all map to `"web-dev"`.
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Display label for a tag key: hyphens back to spaces
pub fn tag_label(key: &str) -> String {
    key.replace('-', " ")
}

/// Count posts per normalized tag, in order of first appearance
pub fn aggregate_tags<'a, I>(posts: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut tags: IndexMap<String, usize> = IndexMap::new();

    for post in posts {
        for tag in &post.tags {
            let key = normalize_tag(tag);
            if key.is_empty() {
                continue;
            }
            *tags.entry(key).or_insert(0) += 1;
        }
    }

    tags
}

/// A tag and the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Tag counts sorted by count, most used first
///
/// Ties keep first-appearance order.
pub fn sorted_tag_counts<'a, I>(posts: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut counts: Vec<TagCount> = aggregate_tags(posts)
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Posts carrying `tag`
///
/// `tag` is the decoded form: a page built from a route key passes it through
/// [`tag_label`] first. `Normalized` compares normalized forms on both sides;
/// `Literal` compares `tag` case-sensitively against each authored tag.
pub fn posts_with_tag<'a, I>(posts: I, tag: &str, mode: TagMatching) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    match mode {
        TagMatching::Normalized => {
            let key = normalize_tag(tag);
            posts
                .into_iter()
                .filter(|post| post.tags.iter().any(|t| normalize_tag(t) == key))
                .collect()
        }
        TagMatching::Literal => posts
            .into_iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::fixture;
    use proptest::prelude::*;

    fn web_dev_posts() -> Vec<Post> {
        vec![
            fixture("a", "A", "2024-01-01", "first", &["Web Dev"]),
            fixture("b", "B", "2024-02-01", "second", &["web-dev"]),
        ]
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Web Dev"), "web-dev");
        assert_eq!(normalize_tag("web-dev"), "web-dev");
        assert_eq!(normalize_tag("  Next.js   13 "), "next.js-13");
        assert_eq!(normalize_tag("리액트 훅"), "리액트-훅");
        assert_eq!(normalize_tag("   "), "");
    }

    #[test]
    fn test_normalize_tag_collapses_whitespace() {
        assert_eq!(normalize_tag(" Web  Dev"), "web-dev");
        assert_eq!(normalize_tag("Web\tDev\n"), "web-dev");
        assert_eq!(normalize_tag(" Web  Dev"), normalize_tag("Web Dev"));
    }

    #[test]
    fn test_aggregate_merges_normalized_forms() {
        let posts = web_dev_posts();
        let tags = aggregate_tags(&posts);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("web-dev"), Some(&2));
    }

    #[test]
    fn test_aggregate_empty_and_blank_tags() {
        let posts = vec![
            fixture("a", "A", "2024-01-01", "s", &[]),
            fixture("b", "B", "2024-01-02", "s", &["  "]),
        ];
        assert!(aggregate_tags(&posts).is_empty());
    }

    #[test]
    fn test_sorted_tag_counts() {
        let posts = vec![
            fixture("a", "A", "2024-01-01", "s", &["react", "css"]),
            fixture("b", "B", "2024-01-02", "s", &["CSS", "git"]),
            fixture("c", "C", "2024-01-03", "s", &["git", "next"]),
        ];
        let names: Vec<_> = sorted_tag_counts(&posts)
            .into_iter()
            .map(|t| (t.name, t.count))
            .collect();
        assert_eq!(
            names,
            vec![
                ("css".to_string(), 2),
                ("git".to_string(), 2),
                ("react".to_string(), 1),
                ("next".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_literal_tag_match_is_exact() {
        let posts = web_dev_posts();
        let matched: Vec<_> = posts_with_tag(&posts, "web-dev", TagMatching::Literal)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(matched, vec!["b"]);

        let matched: Vec<_> = posts_with_tag(&posts, "Web Dev", TagMatching::Literal)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(matched, vec!["a"]);

        assert!(posts_with_tag(&posts, "web dev", TagMatching::Literal).is_empty());
    }

    #[test]
    fn test_route_key_decoded_before_literal_match() {
        let posts = web_dev_posts();
        // a tag page for key "web-dev" looks up "web dev"
        assert!(posts_with_tag(&posts, &tag_label("web-dev"), TagMatching::Literal).is_empty());

        let matched: Vec<_> =
            posts_with_tag(&posts, &tag_label("web-dev"), TagMatching::Normalized)
                .into_iter()
                .map(|p| p.slug.as_str())
                .collect();
        assert_eq!(matched, vec!["a", "b"]);
    }

    #[test]
    fn test_literal_tag_without_hyphen() {
        let posts = vec![
            fixture("a", "A", "2024-01-01", "s", &["Web Dev"]),
            fixture("b", "B", "2024-02-01", "s", &["webdev"]),
        ];
        let matched: Vec<_> = posts_with_tag(&posts, "webdev", TagMatching::Literal)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(matched, vec!["b"]);
    }

    #[test]
    fn test_normalized_tag_match_finds_every_counted_post() {
        let posts = web_dev_posts();
        let matched: Vec<_> = posts_with_tag(&posts, "web-dev", TagMatching::Normalized)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(matched, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let posts = web_dev_posts();
        assert!(posts_with_tag(&posts, "rust", TagMatching::Normalized).is_empty());
    }

    fn arb_tags() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Za-z]{1,4}( [A-Za-z]{1,4})?", 0..4)
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_tag_pairs(tag_lists in prop::collection::vec(arb_tags(), 0..8)) {
            let posts: Vec<Post> = tag_lists
                .iter()
                .enumerate()
                .map(|(i, tags)| {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    fixture(&format!("p{}", i), "t", "2024-01-01", "s", &tags)
                })
                .collect();

            let total: usize = aggregate_tags(&posts).values().sum();
            let pairs: usize = posts.iter().map(|p| p.tags.len()).sum();
            prop_assert_eq!(total, pairs);
        }

        #[test]
        fn prop_case_and_spacing_collapse(word in "[a-z]{1,6}", other in "[a-z]{1,6}") {
            let spaced = format!("{} {}", word.to_uppercase(), other);
            let hyphenated = format!("{}-{}", word, other);
            let posts = vec![
                fixture("a", "A", "2024-01-01", "s", &[spaced.as_str()]),
                fixture("b", "B", "2024-01-02", "s", &[hyphenated.as_str()]),
            ];
            let tags = aggregate_tags(&posts);
            prop_assert_eq!(tags.len(), 1);
            prop_assert_eq!(tags.get(hyphenated.as_str()), Some(&2));
        }

        #[test]
        fn prop_normalized_listing_covers_counts(tag_lists in prop::collection::vec(arb_tags(), 0..8)) {
            let posts: Vec<Post> = tag_lists
                .iter()
                .enumerate()
                .map(|(i, tags)| {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    fixture(&format!("p{}", i), "t", "2024-01-01", "s", &tags)
                })
                .collect();

            for (key, count) in aggregate_tags(&posts) {
                let listed = posts_with_tag(&posts, &key, TagMatching::Normalized);
                // a post carrying the same tag twice counts twice but lists once
                prop_assert!(listed.len() <= count);
                prop_assert!(!listed.is_empty());
            }
        }
    }
}
