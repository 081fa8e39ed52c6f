//! Parsing of BGG XML API2 responses (users and collections)

use serde::Deserialize;

use crate::core::source::User;
use crate::entities::{Game, Rating};

#[derive(Debug, Deserialize)]
struct UserXml {
    #[serde(rename = "@id", default)]
    id: String,

    #[serde(rename = "@name", default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ItemsXml {
    #[serde(rename = "item", default)]
    items: Vec<ItemXml>,
}

#[derive(Debug, Deserialize)]
struct ItemXml {
    #[serde(rename = "@objectid")]
    object_id: u64,

    #[serde(default)]
    stats: Option<StatsXml>,

    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsXml {
    #[serde(default)]
    rating: Option<ValueXml>,
}

#[derive(Debug, Deserialize)]
struct ValueXml {
    #[serde(rename = "@value", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorsXml {
    #[serde(rename = "error", default)]
    errors: Vec<ErrorXml>,
}

#[derive(Debug, Deserialize)]
struct ErrorXml {
    #[serde(default)]
    message: String,
}

/// Outcome of parsing a user lookup
#[derive(Debug, PartialEq, Eq)]
pub enum UserLookup {
    Found(User),
    NotFound,
}

/// Parse `/user?name=...`; BGG answers unknown names with an empty id
pub fn parse_user(xml: &str) -> Result<UserLookup, String> {
    let user: UserXml = quick_xml::de::from_str(xml).map_err(|e| e.to_string())?;
    if user.id.trim().is_empty() {
        return Ok(UserLookup::NotFound);
    }
    let id = user
        .id
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid user id {:?}: {}", user.id, e))?;
    Ok(UserLookup::Found(User {
        id,
        name: user.name,
    }))
}

/// Parse `/collection?...&stats=1` into collection entries
pub fn parse_collection(xml: &str) -> Result<Vec<Game>, String> {
    if let Some(message) = api_error(xml) {
        return Err(message);
    }
    let items: ItemsXml = quick_xml::de::from_str(xml).map_err(|e| e.to_string())?;
    Ok(items
        .items
        .into_iter()
        .map(|item| Game {
            id: item.object_id,
            rating: item
                .stats
                .and_then(|s| s.rating)
                .and_then(|r| Rating::parse(&r.value)),
            comment: item.comment.filter(|c| !c.is_empty()),
        })
        .collect())
}

/// Error message of an `<errors>` document, if that is what `xml` is
fn api_error(xml: &str) -> Option<String> {
    if !xml.contains("<errors") {
        return None;
    }
    let errors: ErrorsXml = quick_xml::de::from_str(xml).ok()?;
    let messages: Vec<String> = errors.errors.into_iter().map(|e| e.message).collect();
    Some(if messages.is_empty() {
        "BGG returned an error".to_string()
    } else {
        messages.join("; ")
    })
}
