//! Look-back report assembly and CSV output

use csv::{QuoteStyle, Terminator, WriterBuilder};
use miette::Diagnostic;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::filter::filter_cell;
use crate::core::joiner::GameIndex;
use crate::core::period::{cell_date, Granularity};
use crate::core::source::GeekSource;
use crate::entities::Video;

/// Columns every report carries
pub const BASE_HEADER: [&str; 7] = [
    "Game",
    "Rating",
    "New Rating",
    "Comment",
    "BGG Link",
    "Date Added",
    "Video URL",
];

/// Extra column of the description layout
pub const DESCRIPTION_HEADER: &str = "YT Description";

/// One (year, period) pair of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCell {
    pub reference_year: i32,
    pub year: i32,
    pub period: u32,
    pub granularity: Granularity,
}

impl ReportCell {
    pub fn years_ago(&self) -> i32 {
        self.reference_year - self.year
    }

    /// `look-back-<date>--<N>-year[s]-ago.csv`
    pub fn file_name(&self) -> String {
        let date = match cell_date(self.reference_year, self.period, self.granularity) {
            Some(date) => match self.granularity {
                Granularity::Month => date.format("%Y-%b").to_string(),
                Granularity::Week => date.format("%Y-%m-%d").to_string(),
            },
            None => format!("{}-{}{}", self.reference_year, self.granularity, self.period),
        };
        let n = self.years_ago();
        let plural = if n > 1 { "s" } else { "" };
        format!("look-back-{}--{}-year{}-ago.csv", date, n, plural)
    }
}

/// Presentation options shared by every report of a run
#[derive(Debug, Clone)]
pub struct ReportLayout {
    /// Prefix for the relative game links, e.g. `https://boardgamegeek.com`
    pub site_url: String,

    /// Add the "YT Description" column
    pub include_description: bool,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            site_url: "https://boardgamegeek.com".to_string(),
            include_description: true,
        }
    }
}

impl ReportLayout {
    pub fn header(&self) -> Vec<&'static str> {
        let mut header = BASE_HEADER.to_vec();
        if self.include_description {
            header.push(DESCRIPTION_HEADER);
        }
        header
    }
}

/// A rendered report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub game: String,
    pub rating: String,
    pub new_rating: String,
    pub comment: String,
    pub link: String,
    pub date_added: String,
    pub video_url: String,
    pub description: Option<String>,
}

impl ReportRow {
    fn record(&self) -> Vec<&str> {
        let mut record = vec![
            self.game.as_str(),
            self.rating.as_str(),
            self.new_rating.as_str(),
            self.comment.as_str(),
            self.link.as_str(),
            self.date_added.as_str(),
            self.video_url.as_str(),
        ];
        if let Some(description) = &self.description {
            record.push(description);
        }
        record
    }
}

/// The rows of one cell, ready to write
#[derive(Debug, Clone)]
pub struct Report {
    pub cell: ReportCell,
    pub file_name: String,
    pub header: Vec<&'static str>,
    pub rows: Vec<ReportRow>,
}

/// Errors that can occur while writing a report
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    #[diagnostic(code(look_back::report::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV {path}: {source}")]
    #[diagnostic(code(look_back::report::csv))]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Report {
    /// Write the report as CSV with every field quoted
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row.record())?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the report into `dir` under its file name
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(&self.file_name);
        let file = std::fs::File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        self.write_csv(std::io::BufWriter::new(file))
            .map_err(|source| ReportError::Csv {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Outcome of [`order_by_rating`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingOrder {
    /// Stable ascending sort was applied
    Sorted,
    /// Ratings could not be compared; input order kept
    InputOrder { ratings: String },
}

/// Sort videos ascending by rating, or leave them alone if that is impossible
///
/// Equal ratings keep their relative order. A rating that is not a comparable
/// number makes the whole set unsortable; the input order is kept and a
/// warning lists the raw ratings.
pub fn order_by_rating(videos: &mut [Video]) -> RatingOrder {
    let comparable = videos
        .iter()
        .all(|v| v.rating().try_cmp(v.rating()).is_some());

    if comparable {
        videos.sort_by(|a, b| a.rating().try_cmp(b.rating()).unwrap_or(Ordering::Equal));
        return RatingOrder::Sorted;
    }

    let ratings = format!(
        "[{}]",
        videos
            .iter()
            .map(|v| v.rating().to_log_repr())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::warn!(ratings = %ratings, "Couldn't sort videos by rating, keeping post order");
    RatingOrder::InputOrder { ratings }
}

/// Watch URL for a video, empty when unknown or unreachable
pub fn resolve_video_url<S: GeekSource + ?Sized>(source: &S, video: &Video) -> String {
    match source.video_detail(&video.id) {
        Ok(detail) => detail.playback_url().unwrap_or_default(),
        Err(e) => {
            tracing::warn!(video_id = %video.id, error = %e, "Unable to fetch video data");
            String::new()
        }
    }
}

/// Build the report of one cell
///
/// Selects the cell's videos, enriches them from `games`, orders them by
/// rating and resolves each video's URL.
pub fn assemble<S: GeekSource + ?Sized>(
    source: &S,
    videos: &[Video],
    games: &GameIndex,
    cell: &ReportCell,
    layout: &ReportLayout,
) -> Report {
    let file_name = cell.file_name();
    tracing::info!("Generating Look Back Report: {}", file_name);

    let mut matched = filter_cell(videos, cell.year, cell.period, cell.granularity);
    for video in matched.iter_mut() {
        let (rating, comment) = games.enrichment_for(video);
        video.enrich(rating, comment);
    }

    order_by_rating(&mut matched);

    let rows = matched
        .iter()
        .map(|video| {
            let video_url = resolve_video_url(source, video);
            let description = layout
                .include_description
                .then(|| format!("{}: {}", video.item.name, video_url));
            ReportRow {
                game: video.item.name.clone(),
                rating: video.rating().to_cell(),
                new_rating: String::new(),
                comment: video.comment().to_string(),
                link: format!("{}{}", layout.site_url.trim_end_matches('/'), video.item.href),
                date_added: video.posted.format("%Y-%m-%d").to_string(),
                video_url,
                description,
            }
        })
        .collect();

    Report {
        cell: *cell,
        file_name,
        header: layout.header(),
        rows,
    }
}
