//! Defines the [`Post`] type and the date coercions applied when frontmatter
//! values are mapped onto it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;

/// Represents a single blog post. Posts are loaded once (see
/// [`crate::parser::Parser`]) and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The post's identifier: its source path relative to the posts
    /// directory, less the `.md` extension (e.g., `2024/hello`).
    pub id: String,

    /// The title of the post.
    pub title: String,

    /// A short description for listings and meta tags.
    pub description: String,

    /// The publish timestamp. `None` when the source value could not be
    /// parsed, in which case the post is never visible in production.
    pub pub_datetime: Option<DateTime<Utc>>,

    /// The last-modified timestamp, if any.
    pub mod_datetime: Option<DateTime<Utc>>,

    /// Drafts are never visible.
    pub draft: bool,

    /// The raw tag labels in the order the author wrote them.
    pub tags: Vec<String>,

    /// The raw Markdown body.
    pub body: String,
}

impl Post {
    /// The date used for ordering: the modification time if there is one,
    /// else the publish time.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.mod_datetime.or(self.pub_datetime)
    }
}

/// Parses a frontmatter date. Accepts RFC 3339 (`2024-05-01T10:00:00+07:00`),
/// `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`; the latter two are read as UTC.
/// Returns `None` for anything else.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// Coerces a frontmatter date, logging when the value is dropped. `field` and
// `id` only feed the log line.
pub(crate) fn coerce_datetime(
    id: &str,
    field: &str,
    value: Option<&str>,
) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = parse_datetime(value);
    if parsed.is_none() {
        warn!("post `{}`: ignoring unparseable {} `{}`", id, field, value);
    }
    parsed
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds a published, non-draft post for tests.
    pub fn post(id: &str, pub_datetime: DateTime<Utc>, tags: &[&str]) -> Post {
        Post {
            id: id.to_owned(),
            title: id.to_owned(),
            description: String::new(),
            pub_datetime: Some(pub_datetime),
            mod_datetime: None,
            draft: false,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            body: String::new(),
        }
    }

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap()),
            parse_datetime("2024-05-01T10:00:00+07:00"),
        );
        assert_eq!(Some(t0()), parse_datetime("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(Some(t0()), parse_datetime("2024-05-01 12:00:00"));
        assert_eq!(Some(t0()), parse_datetime("2024-05-01T12:00:00"));
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            parse_datetime(" 2024-05-01 "),
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(None, parse_datetime("yesterday"));
        assert_eq!(None, parse_datetime("2024-13-01"));
        assert_eq!(None, parse_datetime(""));
    }

    #[test]
    fn test_effective_date_prefers_mod_datetime() {
        let mut p = post("a", t0(), &[]);
        assert_eq!(Some(t0()), p.effective_date());

        let modified = t0() + chrono::Duration::days(3);
        p.mod_datetime = Some(modified);
        assert_eq!(Some(modified), p.effective_date());

        p.pub_datetime = None;
        assert_eq!(Some(modified), p.effective_date());
    }

    #[test]
    fn test_coerce_datetime() {
        assert_eq!(None, coerce_datetime("a", "pubDatetime", None));
        assert_eq!(None, coerce_datetime("a", "pubDatetime", Some("nope")));
        assert_eq!(
            Some(t0()),
            coerce_datetime("a", "pubDatetime", Some("2024-05-01T12:00:00Z")),
        );
    }
}
