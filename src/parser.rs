//! Defines the [`Parser`] and [`Error`] types: the logic for loading posts
//! from Markdown source files into [`Post`] records. Frontmatter is loosely
//! typed YAML; this is where it gets mapped onto [`Post`] and where malformed
//! dates are coerced (see [`crate::post::parse_datetime`]).

use std::{
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;

use crate::post::{coerce_datetime, Post};

const MARKDOWN_EXTENSION: &str = "md";

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// `posts_directory` is the directory post source files are read from.
    /// Post IDs are paths relative to it.
    posts_directory: &'a Path,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser for the posts under `posts_directory`.
    pub fn new(posts_directory: &'a Path) -> Parser<'a> {
        Parser { posts_directory }
    }

    /// Walks the posts directory and returns a [`Post`] for every `.md` file,
    /// ordered by path. Display ordering is left to
    /// [`crate::sort::sorted_visible_posts`]. Each post file must be
    /// structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with fields `title`, `pubDatetime`, and optionally
    ///    `description`, `modDatetime`, `draft` and `tags`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// pubDatetime: 2024-05-01T10:00:00Z
    /// tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse_posts(&self) -> Result<Vec<Post>> {
        use walkdir::WalkDir;

        let mut posts = Vec::new();
        for result in WalkDir::new(self.posts_directory).sort_by_file_name() {
            let entry = result?;
            if entry.file_type().is_file()
                && entry.path().extension().map_or(false, |e| e == MARKDOWN_EXTENSION)
            {
                posts.push(self.parse_post(
                    // strip_prefix() should never fail since every entry is
                    // under `posts_directory`
                    entry.path().strip_prefix(self.posts_directory).unwrap(),
                )?);
            }
        }
        debug!(
            "parsed {} posts from `{}`",
            posts.len(),
            self.posts_directory.display()
        );
        Ok(posts)
    }

    /// Parses the post at `relative_path` (relative to the posts directory).
    pub fn parse_post(&self, relative_path: &Path) -> Result<Post> {
        match self._parse_post(relative_path) {
            Ok(p) => Ok(p),
            Err(e) => Err(Error::Annotated(
                format!("parsing post `{}`", relative_path.display()),
                Box::new(e),
            )),
        }
    }

    fn _parse_post(&self, relative_path: &Path) -> Result<Post> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(self.posts_directory.join(relative_path))?
            .read_to_string(&mut contents)?;
        Post::from_source(&post_id(relative_path)?, &contents)
    }
}

// `2024/hello.md` -> `2024/hello`, with `/` separators on every platform.
fn post_id(relative_path: &Path) -> Result<String> {
    let without_extension = relative_path.with_extension("");
    let mut parts = Vec::new();
    for component in without_extension.components() {
        parts.push(
            component
                .as_os_str()
                .to_str()
                .ok_or_else(|| InvalidFileNameError(relative_path.to_owned()))?,
        );
    }
    Ok(parts.join("/"))
}

impl Post {
    /// Parses a single [`Post`] from its `id` and the contents of its source
    /// file.
    pub fn from_source(id: &str, input: &str) -> Result<Post> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            // the closing fence must start a line; `---` inside a value
            // doesn't end the frontmatter
            const CLOSING_FENCE: &str = "\n---";
            match input[FENCE.len()..].find(CLOSING_FENCE) {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),                                // yaml_start
                    FENCE.len() + offset,                       // yaml_stop
                    FENCE.len() + offset + CLOSING_FENCE.len(), // body_start
                )),
            }
        }

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

        Ok(Post {
            id: id.to_owned(),
            title: frontmatter.title,
            description: frontmatter.description,
            pub_datetime: coerce_datetime(id, "pubDatetime", frontmatter.pub_datetime.as_deref()),
            mod_datetime: coerce_datetime(id, "modDatetime", frontmatter.mod_datetime.as_deref()),
            draft: frontmatter.draft,
            tags: frontmatter.tags,
            body: input[body_start..].trim_start_matches(|c| c == '\r' || c == '\n').to_owned(),
        })
    }
}

fn default_tags() -> Vec<String> {
    vec!["others".to_owned()]
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    /// The title of the post.
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Kept as text so a malformed date degrades instead of failing the load.
    #[serde(default)]
    pub pub_datetime: Option<String>,

    #[serde(default)]
    pub mod_datetime: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// The tags associated with the post.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

#[derive(Debug)]
pub struct InvalidFileNameError(PathBuf);

impl fmt::Display for InvalidFileNameError {
    /// Displays an [`InvalidFileNameError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid file name: {:?}", &self.0)
    }
}

impl std::error::Error for InvalidFileNameError {
    /// Implements the [`std::error::Error`] trait for [`InvalidFileNameError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(InvalidFileNameError),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::InvalidFileName(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::InvalidFileName(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<InvalidFileNameError> for Error {
    fn from(err: InvalidFileNameError) -> Error {
        Error::InvalidFileName(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while walking the posts directory.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
