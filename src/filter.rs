//! Decides whether a [`Post`] should be shown. Drafts are always hidden;
//! everything else is shown in development mode, and in production once its
//! scheduled-visible instant (`pub_datetime - scheduled_margin`) has passed.

use crate::post::Post;
use chrono::{DateTime, Duration, Utc};

/// The environment the site is being built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Previews: every non-draft post is visible, including scheduled ones.
    Development,

    /// Published builds: scheduled posts stay hidden until their time.
    Production,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Production
    }
}

/// Returns whether `post` is visible at `now`. In production the check is
/// strict: a post published exactly at `now + scheduled_margin` is not yet
/// visible. A post without a parseable publish date is never visible in
/// production.
pub fn is_visible(
    post: &Post,
    now: DateTime<Utc>,
    mode: Mode,
    scheduled_margin: Duration,
) -> bool {
    if post.draft {
        return false;
    }
    if mode == Mode::Development {
        return true;
    }
    match post.pub_datetime {
        None => false,
        Some(published) => match published.checked_sub_signed(scheduled_margin) {
            Some(visible_from) => now > visible_from,
            // the margin reaches past the earliest representable instant
            None => true,
        },
    }
}

/// Bundles the inputs of [`is_visible`] that are shared by every post in a
/// build so they can be passed around as one value.
#[derive(Clone, Copy, Debug)]
pub struct Visibility {
    pub now: DateTime<Utc>,
    pub mode: Mode,
    pub scheduled_margin: Duration,
}

impl Visibility {
    /// Constructs a new [`Visibility`]. Negative margins are clamped to zero.
    pub fn new(now: DateTime<Utc>, mode: Mode, scheduled_margin: Duration) -> Self {
        Visibility {
            now,
            mode,
            scheduled_margin: std::cmp::max(scheduled_margin, Duration::zero()),
        }
    }

    pub fn admits(&self, post: &Post) -> bool {
        is_visible(post, self.now, self.mode, self.scheduled_margin)
    }

    /// Returns the visible posts in input order.
    pub fn filter<'a>(&self, posts: &'a [Post]) -> impl Iterator<Item = &'a Post> {
        let visibility = *self;
        posts.iter().filter(move |p| visibility.admits(p))
    }
}
