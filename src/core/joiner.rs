//! Cross-referencing videos with the user's collection

use std::collections::HashMap;

use crate::core::source::{FetchError, GeekSource};
use crate::entities::{Game, Rating, Video};

/// Most ids the collection API accepts per query
pub const CHUNK_SIZE: usize = 100;

/// Collection entries keyed by the string form of their game id
#[derive(Debug, Default)]
pub struct GameIndex {
    games: HashMap<String, Game>,
}

impl GameIndex {
    /// Index fetched games; when an id repeats, the first entry wins
    pub fn from_games(games: Vec<Game>) -> Self {
        let mut index: HashMap<String, Game> = HashMap::with_capacity(games.len());
        for game in games {
            index.entry(game.id.to_string()).or_insert(game);
        }
        Self { games: index }
    }

    /// Find the entry whose numeric id renders as `item_id`
    pub fn lookup(&self, item_id: &str) -> Option<&Game> {
        self.games.get(item_id)
    }

    /// Rating and comment for a video, `0` and `""` when unknown
    pub fn enrichment_for(&self, video: &Video) -> (Rating, String) {
        let game = self.lookup(&video.item.id);
        let rating = game
            .and_then(|g| g.rating.clone())
            .unwrap_or(Rating::UNRATED);
        let comment = game.and_then(|g| g.comment.clone()).unwrap_or_default();
        (rating, comment)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Game ids of `videos` in order, split into query-sized chunks
///
/// Ids are not deduplicated, so the number of chunks follows the number
/// of videos rather than the number of distinct games.
pub fn chunk_game_ids(videos: &[Video]) -> Vec<Vec<String>> {
    let ids: Vec<String> = videos.iter().map(|v| v.item.id.clone()).collect();
    ids.chunks(CHUNK_SIZE).map(<[String]>::to_vec).collect()
}

/// Fetch the user's collection entries for every game referenced by `videos`
pub fn join<S: GeekSource + ?Sized>(
    source: &S,
    user_name: &str,
    videos: &[Video],
) -> Result<GameIndex, FetchError> {
    let mut games = Vec::new();
    for (i, chunk) in chunk_game_ids(videos).iter().enumerate() {
        let fetched = source.collection(user_name, chunk)?;
        tracing::debug!(
            chunk = i + 1,
            ids = chunk.len(),
            found = fetched.len(),
            "Fetched collection chunk"
        );
        games.extend(fetched);
    }
    Ok(GameIndex::from_games(games))
}
