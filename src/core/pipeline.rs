//! The look-back run: resolve, collect, filter, join, report

use chrono::NaiveDate;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::collector::collect_all;
use crate::core::filter::filter;
use crate::core::joiner::join;
use crate::core::period::{look_back_years, resolve, PeriodError, PeriodSpec};
use crate::core::report::{assemble, ReportCell, ReportError, ReportLayout};
use crate::core::source::{FetchError, GeekSource};

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct LookBackRequest {
    pub username: String,
    pub reference_year: i32,
    pub period: PeriodSpec,
    pub output_dir: PathBuf,
    pub layout: ReportLayout,
}

/// A CSV file produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub cell: ReportCell,
    pub path: PathBuf,
    pub rows: usize,
}

/// Fatal errors of a run
#[derive(Debug, Error, Diagnostic)]
pub enum LookBackError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to create output directory {path}: {source}")]
    #[diagnostic(code(look_back::output_dir))]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run the whole look-back for one user
///
/// `today` is used for "current" periods. Writes one CSV per
/// (year, period) cell into the request's output directory, years in
/// look-back order and periods ascending within each year.
pub fn run<S: GeekSource + ?Sized>(
    source: &S,
    request: &LookBackRequest,
    today: NaiveDate,
) -> Result<Vec<WrittenReport>, LookBackError> {
    let years = look_back_years(request.reference_year);
    let periods = resolve(&request.period, request.reference_year, today)?;
    tracing::debug!(
        ?years,
        granularity = %periods.granularity,
        periods = ?periods.periods,
        "Resolved look-back cells"
    );

    tracing::info!("Fetching user: {}", request.username);
    let user = source.user(&request.username)?;

    tracing::info!("Fetching videos for {}", user.name);
    let videos = collect_all(source, user.id)?;
    tracing::debug!(count = videos.len(), "Collected videos");

    let filtered = filter(&videos, &years, &periods.periods, periods.granularity);
    tracing::debug!(count = filtered.len(), "Videos in look-back periods");

    tracing::info!("Fetching board games from {}'s collection", user.name);
    let games = join(source, &user.name, &filtered)?;
    if games.is_empty() && !filtered.is_empty() {
        tracing::warn!("None of the reviewed games are in {}'s collection", user.name);
    } else {
        tracing::debug!(count = games.len(), "Collection entries joined");
    }

    std::fs::create_dir_all(&request.output_dir).map_err(|source| LookBackError::OutputDir {
        path: request.output_dir.clone(),
        source,
    })?;

    let mut written = Vec::new();
    for year in years {
        for &period in &periods.periods {
            let cell = ReportCell {
                reference_year: request.reference_year,
                year,
                period,
                granularity: periods.granularity,
            };
            let report = assemble(source, &filtered, &games, &cell, &request.layout);
            let path = report.save(&request.output_dir)?;
            written.push(WrittenReport {
                cell: report.cell,
                path,
                rows: report.rows.len(),
            });
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::{video, FakeSource};
    use crate::core::period::Granularity;
    use crate::entities::{Game, Rating};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn request(dir: &TempDir, period: PeriodSpec) -> LookBackRequest {
        LookBackRequest {
            username: "alice".to_string(),
            reference_year: 2024,
            period,
            output_dir: dir.path().join("out"),
            layout: ReportLayout::default(),
        }
    }

    #[test]
    fn test_one_file_per_cell() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();

        let written = run(&source, &request(&tmp, PeriodSpec::month("all")), today()).unwrap();

        assert_eq!(written.len(), 3 * 11);
        assert_eq!(written[0].cell.year, 2023);
        assert_eq!(written[0].cell.period, 1);
        assert_eq!(written[11].cell.year, 2019);
        assert_eq!(written[32].cell.year, 2014);
        assert_eq!(written[32].cell.period, 11);
        assert!(written.iter().all(|w| w.path.exists() && w.rows == 0));
    }

    #[test]
    fn test_invalid_period_fails_before_fetching() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource::default();

        let result = run(&source, &request(&tmp, PeriodSpec::week("abc")), today());

        assert!(matches!(result, Err(LookBackError::Period(_))));
        assert!(source.page_calls.borrow().is_empty());
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_collection_failure_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource {
            pages: vec![vec![video("1", "2019-06-12", "13", "Catan")]],
            fail_collection: true,
            ..Default::default()
        };

        let result = run(&source, &request(&tmp, PeriodSpec::default()), today());

        assert!(matches!(result, Err(LookBackError::Fetch(_))));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_only_filtered_games_are_joined() {
        let tmp = TempDir::new().unwrap();
        let source = FakeSource {
            pages: vec![vec![
                video("1", "2024-06-01", "1", "Recent"),
                video("2", "2019-06-12", "13", "Catan"),
                video("3", "2019-07-12", "14", "Other"),
            ]],
            games: vec![Game::new(13).with_rating(Rating::Score(8.0))],
            ..Default::default()
        };

        let written = run(&source, &request(&tmp, PeriodSpec::default()), today()).unwrap();

        assert_eq!(*source.collection_calls.borrow(), vec![vec!["13".to_string()]]);
        let counts: Vec<_> = written.iter().map(|w| (w.cell.year, w.rows)).collect();
        assert_eq!(counts, vec![(2023, 0), (2019, 1), (2014, 0)]);
        assert!(written.iter().all(|w| w.cell.granularity == Granularity::Month));
    }
}
