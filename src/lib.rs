//! BGG Look-Back
//!
//! Finds the board game video reviews a BoardGameGeek user posted in the
//! same month or week 1, 5 and 10 years ago, joins them with the user's
//! current collection ratings and writes one CSV report per period.

pub mod cli;
pub mod core;
pub mod entities;
