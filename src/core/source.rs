//! Data source seam for BoardGameGeek lookups
//!
//! The pipeline only talks to BGG through [`GeekSource`]. [`crate::core::BggClient`]
//! is the HTTP implementation; tests substitute an in-memory one.

use miette::Diagnostic;
use thiserror::Error;

use crate::entities::{Game, Video};

/// Host name the video API uses for YouTube uploads
pub const YOUTUBE_HOST: &str = "youtube";

/// A BGG user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Hosting details of a single video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetail {
    /// Platform name, e.g. `youtube`
    pub host: String,

    /// The platform's own id for the video
    pub native_id: String,
}

impl VideoDetail {
    /// Watch URL, only for platforms we know how to link to
    pub fn playback_url(&self) -> Option<String> {
        if self.host == YOUTUBE_HOST {
            Some(format!("https://www.youtube.com/watch?v={}", self.native_id))
        } else {
            None
        }
    }
}

/// Errors that can occur while fetching from BGG
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    #[diagnostic(code(look_back::fetch::transport))]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    #[diagnostic(code(look_back::fetch::status))]
    Status { url: String, status: u16 },

    #[error("Failed to parse response from {url}: {message}")]
    #[diagnostic(code(look_back::fetch::decode))]
    Decode { url: String, message: String },

    #[error("User not found: {name}")]
    #[diagnostic(
        code(look_back::fetch::user_not_found),
        help("check the spelling of the BoardGameGeek user name")
    )]
    UserNotFound { name: String },

    #[error("Video {video_id} has an unreadable post date: {raw:?}")]
    #[diagnostic(code(look_back::fetch::invalid_date))]
    InvalidDate { video_id: String, raw: String },
}

/// The four BGG operations the look-back pipeline depends on
pub trait GeekSource {
    /// Look up a user by name
    fn user(&self, name: &str) -> Result<User, FetchError>;

    /// One page of the user's review videos, most recent first; empty past the end
    fn videos_page(&self, user_id: u64, page: u32, per_page: u32)
        -> Result<Vec<Video>, FetchError>;

    /// Hosting details for one video
    fn video_detail(&self, video_id: &str) -> Result<VideoDetail, FetchError>;

    /// The user's collection entries for the given game ids
    fn collection(&self, user_name: &str, ids: &[String]) -> Result<Vec<Game>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_url_only_for_youtube() {
        let yt = VideoDetail {
            host: "youtube".to_string(),
            native_id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            yt.playback_url().as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );

        let vimeo = VideoDetail {
            host: "vimeo".to_string(),
            native_id: "12345".to_string(),
        };
        assert_eq!(vimeo.playback_url(), None);
    }
}
