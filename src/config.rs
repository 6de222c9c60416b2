//! Site-wide configuration. A project is configured by a `paperlog.yaml`
//! file at its root; every field is optional and falls back to the theme's
//! stock settings.

use crate::social::{self, Social};
use chrono::Duration;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Project::from_directory`].
pub const PROJECT_FILE: &str = "paperlog.yaml";

/// The text direction of the site.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    Ltr,
    Rtl,
    Auto,
}

/// Configuration for the "suggest changes" link on post pages.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditPost {
    pub enabled: bool,
    pub text: String,

    /// The base URL the post's source path is appended to.
    pub url: String,
}

impl Default for EditPost {
    fn default() -> Self {
        EditPost {
            enabled: false,
            text: "建议修改".to_owned(),
            url: "https://github.com/satnaing/astro-paper/edit/main/".to_owned(),
        }
    }
}

/// The site settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Site {
    /// The deployed site's root URL, used for absolute links.
    pub website: Url,
    pub author: String,

    /// The author's profile page.
    pub profile: Url,
    pub desc: String,
    pub title: String,

    /// The default OG image file name under the public directory.
    pub og_image: String,
    pub light_and_dark_mode: bool,

    /// The number of posts on the home page.
    pub post_per_index: usize,

    /// The number of posts per listing page.
    pub post_per_page: usize,

    /// How long before its publish time a scheduled post becomes visible, in
    /// milliseconds.
    pub scheduled_post_margin: u64,
    pub show_archives: bool,
    pub show_back_button: bool,
    pub edit_post: EditPost,
    pub dynamic_og_image: bool,
    pub dir: Dir,

    /// The HTML `lang` code. Empty means `en`; see [`Site::lang`].
    pub lang: String,

    /// The IANA time zone dates are displayed in.
    pub timezone: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            // both literals are valid URLs
            website: Url::parse("https://astro-paper.pages.dev/").unwrap(),
            author: "Sat Naing".to_owned(),
            profile: Url::parse("https://satnaing.dev/").unwrap(),
            desc: "A minimal, responsive and SEO-friendly Astro blog theme.".to_owned(),
            title: "***'s Blog".to_owned(),
            og_image: "astropaper-og.jpg".to_owned(),
            light_and_dark_mode: false,
            post_per_index: 4,
            post_per_page: 4,
            scheduled_post_margin: 15 * 60 * 1000,
            show_archives: true,
            show_back_button: true,
            edit_post: EditPost::default(),
            dynamic_og_image: true,
            dir: Dir::Ltr,
            lang: "zh-cn".to_owned(),
            timezone: "Asia/Bangkok".to_owned(),
        }
    }
}

impl Site {
    /// The scheduled-post margin as a [`Duration`].
    pub fn scheduled_margin(&self) -> Duration {
        Duration::milliseconds(self.scheduled_post_margin.min(i64::MAX as u64) as i64)
    }

    /// The HTML `lang` code, defaulting to `en`.
    pub fn lang(&self) -> &str {
        if self.lang.is_empty() {
            "en"
        } else {
            &self.lang
        }
    }

    /// The URL of the first page of a tag's index, e.g.,
    /// `{website}tags/{slug}/`.
    pub fn tag_url(&self, slug: &str) -> Result<Url> {
        // NOTE: the trailing slashes matter; without them `Url::join` treats
        // the last segment as a file name and replaces it.
        Ok(self.website.join(&format!("tags/{}/", slug))?)
    }

    /// The URL of a post page, e.g., `{website}posts/{id}/`.
    pub fn post_url(&self, id: &str) -> Result<Url> {
        Ok(self.website.join(&format!("posts/{}/", id))?)
    }

    /// The "suggest changes" URL for a post's source file, or `None` when
    /// the feature is disabled.
    pub fn edit_url(&self, source_path: &str) -> Option<String> {
        if self.edit_post.enabled {
            Some(format!("{}{}", self.edit_post.url, source_path))
        } else {
            None
        }
    }
}

#[derive(Deserialize, Default)]
struct ProjectFile {
    #[serde(default)]
    site: Site,

    #[serde(default)]
    socials: Option<Vec<Social>>,

    #[serde(default)]
    share_links: Option<Vec<Social>>,
}

/// A loaded project: its settings, links, and where its posts live.
#[derive(Clone, Debug)]
pub struct Project {
    pub site: Site,
    pub socials: Vec<Social>,
    pub share_links: Vec<Social>,
    pub posts_directory: PathBuf,
}

impl Project {
    /// Searches `dir` and its ancestors for a [`PROJECT_FILE`] and loads the
    /// first one found.
    pub fn from_directory(dir: &Path) -> Result<Project> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Project::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Project::from_directory(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    /// Like [`Project::from_directory`], but a missing project file yields
    /// the stock settings rooted at `dir`.
    pub fn from_directory_or_default(dir: &Path) -> Result<Project> {
        match Project::from_directory(dir) {
            Err(Error::NotFound) => {
                debug!("no `{}` found; using the stock settings", PROJECT_FILE);
                Ok(Project::from_file(ProjectFile::default(), dir))
            }
            result => result,
        }
    }

    /// Loads a project from the project file at `path`. Posts are expected
    /// in the `posts` directory next to it.
    pub fn from_project_file(path: &Path) -> Result<Project> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: ProjectFile = serde_yaml::from_reader(file)?;
        debug!("loaded project file `{}`", path.display());
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Project::from_file(project, root))
    }

    fn from_file(file: ProjectFile, root: &Path) -> Project {
        let site = file.site;
        let mut socials = file.socials.unwrap_or_else(|| social::socials(&site));
        let mut share_links = file.share_links.unwrap_or_else(social::share_links);
        social::fill_link_titles(&mut socials, &site);
        social::fill_link_titles(&mut share_links, &site);
        Project {
            site,
            socials,
            share_links,
            posts_directory: root.join("posts"),
        }
    }
}

/// Represents the result of loading configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no project file exists in the directory or any of its
    /// ancestors.
    NotFound,

    /// Returned when the project file couldn't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML for a project.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a configured URL can't be joined.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::Open { path, err } => {
                write!(f, "Opening project file `{}`: {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => {
                write!(f, "Loading configuration: {}", err)
            }
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
