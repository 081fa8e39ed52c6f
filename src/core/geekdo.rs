//! Wire types of the geekdo JSON video API

use serde::Deserialize;

use crate::core::source::{FetchError, VideoDetail};
use crate::entities::video::{parse_post_date, string_or_number};
use crate::entities::{AssocItem, Video};

/// `GET /videos` response
#[derive(Debug, Deserialize)]
pub struct VideoListing {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

/// One entry of a video listing
#[derive(Debug, Deserialize)]
pub struct VideoRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub postdate: String,

    #[serde(rename = "assocItem")]
    pub assoc_item: AssocItem,
}

impl VideoRecord {
    pub fn into_video(self) -> Result<Video, FetchError> {
        let posted = parse_post_date(&self.postdate).ok_or_else(|| FetchError::InvalidDate {
            video_id: self.id.clone(),
            raw: self.postdate.clone(),
        })?;
        Ok(Video::new(self.id, posted, self.assoc_item))
    }
}

impl VideoListing {
    pub fn into_videos(self) -> Result<Vec<Video>, FetchError> {
        self.videos.into_iter().map(VideoRecord::into_video).collect()
    }
}

/// `GET /videos/<id>` response
#[derive(Debug, Deserialize)]
pub struct VideoDetailEnvelope {
    pub video: VideoDetailRecord,
}

#[derive(Debug, Deserialize)]
pub struct VideoDetailRecord {
    #[serde(default)]
    pub host: String,

    /// The hosting platform's id for the video
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

impl From<VideoDetailEnvelope> for VideoDetail {
    fn from(envelope: VideoDetailEnvelope) -> Self {
        VideoDetail {
            host: envelope.video.host,
            native_id: envelope.video.id,
        }
    }
}
