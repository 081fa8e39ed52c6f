//! Blocking HTTP client for BoardGameGeek
//!
//! Users and collections come from the XML API2, videos from the geekdo
//! JSON API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;

use crate::core::config::Config;
use crate::core::geekdo::{VideoDetailEnvelope, VideoListing};
use crate::core::source::{FetchError, GeekSource, User, VideoDetail};
use crate::core::xmlapi::{parse_collection, parse_user, UserLookup};
use crate::entities::{Game, Video};

const USER_AGENT: &str = concat!("bgg-look-back/", env!("CARGO_PKG_VERSION"));

/// BGG client built from [`Config`]
pub struct BggClient {
    http: Client,
    xml_api_url: String,
    video_api_url: String,
    api_token: Option<String>,
    queued_attempts: u32,
    queued_wait: Duration,
}

impl BggClient {
    /// Create a new client
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.xml_api_url().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            xml_api_url: config.xml_api_url().trim_end_matches('/').to_string(),
            video_api_url: config.video_api_url().trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            queued_attempts: config.queued_attempts().max(1),
            queued_wait: Duration::from_secs(config.queued_wait_secs()),
        })
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, FetchError> {
        request.send().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!(url, "GET");
        let response = self.send(url, self.http.get(url).query(query))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// GET an XML API document
    ///
    /// BGG answers `202 Accepted` while it prepares a collection; the request
    /// is repeated after a pause until the document is ready.
    fn get_xml(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        for attempt in 1..=self.queued_attempts {
            tracing::debug!(url, attempt, "GET");
            let mut request = self.http.get(url).query(query);
            if let Some(token) = &self.api_token {
                request = request.bearer_auth(token);
            }
            let response = self.send(url, request)?;

            match response.status() {
                StatusCode::ACCEPTED => {
                    tracing::debug!(url, "Request queued by BGG, waiting");
                    thread::sleep(self.queued_wait);
                }
                status if status.is_success() => {
                    return response.text().map_err(|e| FetchError::Decode {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
                status => {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    })
                }
            }
        }

        Err(FetchError::Status {
            url: url.to_string(),
            status: StatusCode::ACCEPTED.as_u16(),
        })
    }
}

impl GeekSource for BggClient {
    fn user(&self, name: &str) -> Result<User, FetchError> {
        let url = format!("{}/user", self.xml_api_url);
        let xml = self.get_xml(&url, &[("name", name.to_string())])?;
        match parse_user(&xml).map_err(|message| FetchError::Decode {
            url: url.clone(),
            message,
        })? {
            UserLookup::Found(user) => Ok(user),
            UserLookup::NotFound => Err(FetchError::UserNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn videos_page(
        &self,
        user_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Video>, FetchError> {
        let url = format!("{}/videos", self.video_api_url);
        let query = [
            ("partial", "listing".to_string()),
            ("sort", "recent".to_string()),
            ("gallery", "review".to_string()),
            ("subtype", "boardgame".to_string()),
            ("userid", user_id.to_string()),
            ("pageid", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        let listing: VideoListing = self.get_json(&url, &query)?;
        listing.into_videos()
    }

    fn video_detail(&self, video_id: &str) -> Result<VideoDetail, FetchError> {
        let url = format!("{}/videos/{}", self.video_api_url, video_id);
        let envelope: VideoDetailEnvelope = self.get_json(&url, &[])?;
        Ok(envelope.into())
    }

    fn collection(&self, user_name: &str, ids: &[String]) -> Result<Vec<Game>, FetchError> {
        let url = format!("{}/collection", self.xml_api_url);
        let query = [
            ("username", user_name.to_string()),
            ("id", ids.join(",")),
            ("stats", "1".to_string()),
        ];
        let xml = self.get_xml(&url, &query)?;
        parse_collection(&xml).map_err(|message| FetchError::Decode { url, message })
    }
}
