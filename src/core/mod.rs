//! Core module - look-back pipeline and BGG access

pub mod client;
pub mod collector;
pub mod config;
pub mod filter;
pub mod geekdo;
pub mod joiner;
pub mod period;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod xmlapi;

#[cfg(test)]
pub(crate) mod fake;

pub use client::BggClient;
pub use config::Config;
pub use joiner::GameIndex;
pub use period::{Granularity, PeriodError, PeriodSet, PeriodSpec};
pub use pipeline::{LookBackError, LookBackRequest, WrittenReport};
pub use report::{Report, ReportCell, ReportError, ReportLayout, ReportRow};
pub use source::{FetchError, GeekSource, User, VideoDetail};
