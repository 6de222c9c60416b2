//! Social-media links shown in the site footer and the share links shown on
//! post pages.

use crate::config::Site;
use serde::Deserialize;

/// A link to a social-media profile or share target.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Social {
    /// The platform name; themes use it to pick an icon.
    pub name: String,

    /// The link target. Share links end where the post URL gets appended.
    pub href: String,

    /// The link's `title` attribute, also used for accessibility.
    #[serde(default)]
    pub link_title: String,
}

impl Social {
    fn new(name: &str, href: &str, link_title: String) -> Social {
        Social {
            name: name.to_owned(),
            href: href.to_owned(),
            link_title,
        }
    }
}

/// The stock profile links. Link titles mention the site title.
pub fn socials(site: &Site) -> Vec<Social> {
    vec![
        Social::new(
            "Github",
            "https://github.com/satnaing/astro-paper",
            format!("{} on Github", site.title),
        ),
        Social::new(
            "Mail",
            "123456@example.com",
            format!("Send an email to {}", site.title),
        ),
    ]
}

/// The stock share links.
pub fn share_links() -> Vec<Social> {
    vec![Social::new(
        "Mail",
        "mailto:?subject=See%20this%20post&body=",
        "Share this post via email".to_owned(),
    )]
}

/// Fills in a default `link_title` for entries that left it blank.
pub(crate) fn fill_link_titles(links: &mut [Social], site: &Site) {
    for link in links.iter_mut().filter(|l| l.link_title.is_empty()) {
        link.link_title = format!("{} on {}", site.title, link.name);
    }
}
