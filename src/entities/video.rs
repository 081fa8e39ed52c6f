//! Video entity type (a posted review)

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::entities::game::Rating;

static UNRATED: Rating = Rating::UNRATED;

/// The game a video is attached to
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssocItem {
    /// Game id as the video API reports it (compared as a string)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name of the game
    #[serde(default)]
    pub name: String,

    /// Site-relative link, e.g. `/boardgame/13/catan`
    #[serde(default)]
    pub href: String,
}

/// A video review posted by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: String,

    /// Post date in the timestamp's own offset
    pub posted: NaiveDate,

    pub item: AssocItem,

    /// Collection rating, set once by the join
    pub rating: Option<Rating>,

    /// Collection comment, set once by the join
    pub comment: Option<String>,
}

impl Video {
    pub fn new(id: impl Into<String>, posted: NaiveDate, item: AssocItem) -> Self {
        Self {
            id: id.into(),
            posted,
            item,
            rating: None,
            comment: None,
        }
    }

    /// Attach the user's collection rating and comment
    ///
    /// Returns `false` (and leaves the video untouched) if it was already enriched.
    pub fn enrich(&mut self, rating: Rating, comment: String) -> bool {
        if self.rating.is_some() {
            return false;
        }
        self.rating = Some(rating);
        self.comment = Some(comment);
        true
    }

    /// Rating after enrichment, `0` if never enriched
    pub fn rating(&self) -> &Rating {
        self.rating.as_ref().unwrap_or(&UNRATED)
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// Parse a video post timestamp down to its calendar date
///
/// Accepts RFC 3339 / ISO-8601 timestamps with or without an offset, and bare
/// dates. The date is read in the timestamp's own offset.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.naive_local().date());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Ids arrive as JSON strings or numbers depending on the endpoint
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
