//! The library code for `paperlog`, the data layer of a minimal static blog
//! theme. Page templates never see raw posts; they see the output of a few
//! pure list functions:
//!
//! 1. Deciding which posts are visible ([`crate::filter`])
//! 2. Ordering the visible posts newest first ([`crate::sort`])
//! 3. Deriving the distinct, sorted tag list ([`crate::tag`])
//!
//! Tags and URLs are keyed by slugs ([`crate::slug`]). Visibility depends on
//! the current time, the build [`filter::Mode`], and the site's scheduled-post
//! margin, all of which are passed in explicitly so the functions stay pure.
//!
//! Around that core sit the boundary pieces: loading the site configuration
//! ([`crate::config`], [`crate::social`]), loading posts from Markdown files
//! with YAML frontmatter ([`crate::parser`]), and splitting listings into
//! pages ([`crate::page`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod filter;
pub mod page;
pub mod parser;
pub mod post;
pub mod slug;
pub mod social;
pub mod sort;
pub mod tag;
