//! Defines the [`Tag`] type, which describes a distinct tag across a post
//! collection, and the functions that derive tag lists for tag navigation
//! and tag index pages.

use crate::filter::Visibility;
use crate::post::Post;
use crate::slug::slugify;
use crate::sort::sorted_visible_posts;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// A distinct tag. Two raw labels that slugify identically (e.g., `AI` and
/// `ai`) describe the same tag.
#[derive(Clone, Debug)]
pub struct Tag {
    /// The URL-safe form of the tag, e.g., `web-dev`.
    pub slug: String,

    /// The label as the author first wrote it, e.g., `Web Dev`.
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Tag {
        Tag {
            slug: slugify(name),
            name: name.to_owned(),
        }
    }
}

impl Hash for Tag {
    /// Implements [`Hash`] for [`Tag`] by delegating directly to the `slug`
    /// field.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slug.hash(state)
    }
}

impl PartialEq for Tag {
    /// Implements [`PartialEq`] and [`Eq`] for [`Tag`] by delegating directly
    /// to the `slug` field.
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}
impl Eq for Tag {}

/// Collects the tags of every visible post, deduplicated by slug and sorted
/// ascending by slug. When several labels share a slug, the first one
/// encountered (in post order, then in each post's tag order) names the tag.
pub fn unique_sorted_tags(posts: &[Post], visibility: &Visibility) -> Vec<Tag> {
    let mut seen: HashSet<Tag> = HashSet::new();
    let mut tags: Vec<Tag> = visibility
        .filter(posts)
        .flat_map(|post| post.tags.iter())
        .map(|name| Tag::new(name))
        .filter(|tag| seen.insert(tag.clone()))
        .collect();
    tags.sort_by(|a, b| a.slug.cmp(&b.slug));
    tags
}

/// Returns the visible posts carrying a tag whose slug is `slug`, newest
/// first (see [`sorted_visible_posts`]).
pub fn posts_by_tag<'a>(posts: &'a [Post], visibility: &Visibility, slug: &str) -> Vec<&'a Post> {
    sorted_visible_posts(posts, visibility)
        .into_iter()
        .filter(|post| post.tags.iter().any(|t| slugify(t) == slug))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::Mode;
    use crate::post::test::{post, t0};
    use chrono::Duration;

    fn production() -> Visibility {
        Visibility::new(t0(), Mode::Production, Duration::zero())
    }

    fn pairs(tags: &[Tag]) -> Vec<(&str, &str)> {
        tags.iter().map(|t| (t.slug.as_str(), t.name.as_str())).collect()
    }

    fn example_posts() -> Vec<Post> {
        let mut draft = post("draft", t0() + Duration::days(1), &["x"]);
        draft.draft = true;
        vec![
            post("first", t0() - Duration::seconds(1), &["Web Dev", "AI"]),
            post("second", t0() - Duration::days(1), &["ai"]),
            draft,
        ]
    }

    #[test]
    fn test_unique_sorted_tags_example() {
        assert_eq!(
            vec![("ai", "AI"), ("web-dev", "Web Dev")],
            pairs(&unique_sorted_tags(&example_posts(), &production())),
        );
    }

    #[test]
    fn test_first_seen_name_wins() {
        let posts = vec![
            post("a", t0() - Duration::days(2), &["rust-lang", "Rust"]),
            post("b", t0() - Duration::days(1), &["RustLang", "rust"]),
        ];
        assert_eq!(
            vec![("rust", "Rust"), ("rust-lang", "rust-lang")],
            pairs(&unique_sorted_tags(&posts, &production())),
        );
    }

    #[test]
    fn test_hidden_posts_contribute_no_tags() {
        let posts = vec![
            post("future", t0() + Duration::days(1), &["Scheduled"]),
            post("past", t0() - Duration::days(1), &["Shown"]),
        ];
        assert_eq!(
            vec![("shown", "Shown")],
            pairs(&unique_sorted_tags(&posts, &production())),
        );

        let dev = Visibility::new(t0(), Mode::Development, Duration::zero());
        assert_eq!(
            vec![("scheduled", "Scheduled"), ("shown", "Shown")],
            pairs(&unique_sorted_tags(&posts, &dev)),
        );
    }

    #[test]
    fn test_tags_unique_and_ascending() {
        let posts = vec![
            post("a", t0() - Duration::days(3), &["Zig", "go", "C++", "Go"]),
            post("b", t0() - Duration::days(2), &["zig", "ES2015", "a-b", "ab"]),
            post("c", t0() - Duration::days(1), &["", "Web 3", "web3"]),
        ];
        let tags = unique_sorted_tags(&posts, &production());
        for w in tags.windows(2) {
            assert!(w[0].slug < w[1].slug, "{:?} !< {:?}", w[0].slug, w[1].slug);
        }
        let unique: HashSet<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(unique.len(), tags.len());
    }

    #[test]
    fn test_unique_sorted_tags_empty() {
        assert!(unique_sorted_tags(&[], &production()).is_empty());
    }

    #[test]
    fn test_posts_by_tag() {
        let posts = example_posts();
        let ids = |slug: &str| -> Vec<String> {
            posts_by_tag(&posts, &production(), slug)
                .iter()
                .map(|p| p.id.clone())
                .collect()
        };
        assert_eq!(vec!["first", "second"], ids("ai"));
        assert_eq!(vec!["first"], ids("web-dev"));
        assert!(ids("x").is_empty());
    }

    #[test]
    fn test_tag_equality_uses_slug() {
        assert_eq!(Tag::new("Web Dev"), Tag::new("web-dev"));
        assert_ne!(Tag::new("Web Dev"), Tag::new("webdev"));
    }
}
