//! Temporal video filtering

use chrono::Datelike;

use crate::core::period::Granularity;
use crate::entities::Video;

/// Keep videos posted in one of `years` and one of `periods`
///
/// Order is preserved.
pub fn filter(
    videos: &[Video],
    years: &[i32],
    periods: &[u32],
    granularity: Granularity,
) -> Vec<Video> {
    videos
        .iter()
        .filter(|v| matches(v, years, periods, granularity))
        .cloned()
        .collect()
}

/// Narrow form of [`filter`] for a single report cell
pub fn filter_cell(
    videos: &[Video],
    year: i32,
    period: u32,
    granularity: Granularity,
) -> Vec<Video> {
    filter(videos, &[year], &[period], granularity)
}

fn matches(video: &Video, years: &[i32], periods: &[u32], granularity: Granularity) -> bool {
    years.contains(&video.posted.year()) && periods.contains(&granularity.period_of(video.posted))
}
