//! Orders posts for listing pages: newest effective date first.

use crate::filter::Visibility;
use crate::post::Post;
use log::debug;

/// Returns the posts admitted by `visibility`, newest first by
/// [`Post::effective_date`]. Dates are compared at whole-second precision;
/// posts that tie keep their input order. The input slice is not modified.
pub fn sorted_visible_posts<'a>(posts: &'a [Post], visibility: &Visibility) -> Vec<&'a Post> {
    let mut visible: Vec<&Post> = visibility.filter(posts).collect();
    // `sort_by_key` is stable, which is what keeps ties in input order.
    visible.sort_by_key(|post| std::cmp::Reverse(sort_key(post)));
    debug!("{} of {} posts visible", visible.len(), posts.len());
    visible
}

// Undated posts only make it this far in development mode; they sort last.
fn sort_key(post: &Post) -> Option<i64> {
    post.effective_date().map(|date| date.timestamp())
}
