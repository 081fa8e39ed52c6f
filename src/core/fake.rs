//! In-memory [`GeekSource`] for unit tests

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::source::{FetchError, GeekSource, User, VideoDetail};
use crate::entities::{AssocItem, Game, Video};

#[derive(Default)]
pub struct FakeSource {
    pub pages: Vec<Vec<Video>>,
    pub games: Vec<Game>,
    pub details: HashMap<String, VideoDetail>,
    pub fail_page: Option<u32>,
    pub fail_collection: bool,
    pub page_calls: RefCell<Vec<u32>>,
    pub collection_calls: RefCell<Vec<Vec<String>>>,
    pub detail_calls: RefCell<Vec<String>>,
}

impl GeekSource for FakeSource {
    fn user(&self, name: &str) -> Result<User, FetchError> {
        Ok(User {
            id: 42,
            name: name.to_string(),
        })
    }

    fn videos_page(
        &self,
        _user_id: u64,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Video>, FetchError> {
        self.page_calls.borrow_mut().push(page);
        if self.fail_page == Some(page) {
            return Err(FetchError::Status {
                url: format!("fake://videos/{}", page),
                status: 500,
            });
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    fn video_detail(&self, video_id: &str) -> Result<VideoDetail, FetchError> {
        self.detail_calls.borrow_mut().push(video_id.to_string());
        self.details
            .get(video_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("fake://videos/{}", video_id),
                status: 404,
            })
    }

    fn collection(&self, _user_name: &str, ids: &[String]) -> Result<Vec<Game>, FetchError> {
        self.collection_calls.borrow_mut().push(ids.to_vec());
        if self.fail_collection {
            return Err(FetchError::Transport {
                url: "fake://collection".to_string(),
                message: "connection reset".to_string(),
            });
        }
        Ok(self
            .games
            .iter()
            .filter(|g| ids.contains(&g.id.to_string()))
            .cloned()
            .collect())
    }
}

pub fn video(id: &str, posted: &str, game_id: &str, name: &str) -> Video {
    Video::new(
        id,
        NaiveDate::parse_from_str(posted, "%Y-%m-%d").unwrap(),
        AssocItem {
            id: game_id.to_string(),
            name: name.to_string(),
            href: format!("/boardgame/{}/{}", game_id, name.to_lowercase()),
        },
    )
}
