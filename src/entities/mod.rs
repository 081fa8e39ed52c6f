//! Entity type definitions
//!
//! - [`Video`] - A review video posted by the user, with its [`AssocItem`] game
//! - [`Game`] - An entry of the user's collection, carrying their [`Rating`]

pub mod game;
pub mod video;

pub use game::{Game, Rating};
pub use video::{AssocItem, Video};
