//! Game entity type (collection entry)

use std::cmp::Ordering;
use std::fmt;

/// A user's rating for a game
///
/// BGG reports ratings as text. Numbers become [`Rating::Score`]; anything
/// that is not a number and not the `N/A` marker is kept verbatim as
/// [`Rating::Text`] so it can still be shown and logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Rating {
    Score(f64),
    Text(String),
}

impl Rating {
    /// Rating used when a video has no collection match
    pub const UNRATED: Rating = Rating::Score(0.0);

    /// Parse an upstream rating value; `None` means the game is unrated
    pub fn parse(raw: &str) -> Option<Rating> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("n/a") {
            return None;
        }
        match raw.parse::<f64>() {
            Ok(score) => Some(Rating::Score(score)),
            Err(_) => Some(Rating::Text(raw.to_string())),
        }
    }

    /// Numeric ordering, or `None` when either side is not a comparable number
    pub fn try_cmp(&self, other: &Rating) -> Option<Ordering> {
        match (self, other) {
            (Rating::Score(a), Rating::Score(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Value for the report's "Rating" column; unrated (≤ 0) renders blank
    pub fn to_cell(&self) -> String {
        match self {
            Rating::Score(score) if *score > 0.0 => format_score(*score),
            Rating::Score(_) => String::new(),
            Rating::Text(text) => text.clone(),
        }
    }

    /// Representation used in log lines, e.g. `3` or `"x"`
    pub fn to_log_repr(&self) -> String {
        match self {
            Rating::Score(score) => format_score(*score),
            Rating::Text(text) => format!("{:?}", text),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{}", format_score(*score)),
            Rating::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Whole scores print without a fractional part (`8`, not `8.0`)
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

/// One entry of a user's BGG collection
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// BGG thing id
    pub id: u64,

    /// The user's personal rating, if any
    pub rating: Option<Rating>,

    /// The user's free-text comment, if any
    pub comment: Option<String>,
}

impl Game {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            rating: None,
            comment: None,
        }
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
