//! Period resolution: which months or weeks to look back at
//!
//! A period is a recurring calendar unit, either a month (1-12) or a
//! Sunday-first week (0-53, the days before the year's first Sunday are
//! week 0). One run always uses a single granularity.

use chrono::{Datelike, Duration, NaiveDate};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Selector values accepted for `--month` / `--week`
pub const CURRENT: &str = "current";
pub const ALL: &str = "all";

/// Highest Sunday-first week number a date can have
pub const MAX_WEEK: u32 = 53;

/// How far back each report looks, in years
pub const LOOK_BACK_OFFSETS: [i32; 3] = [1, 5, 10];

/// Period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Month,
    Week,
}

impl Granularity {
    /// Period number of `date` under this granularity
    pub fn period_of(&self, date: NaiveDate) -> u32 {
        match self {
            Granularity::Month => date.month(),
            Granularity::Week => sunday_week_number(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Month => write!(f, "month"),
            Granularity::Week => write!(f, "week"),
        }
    }
}

/// Raw `--month` / `--week` selector values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSpec {
    pub month: Option<String>,
    pub week: Option<String>,
}

impl PeriodSpec {
    pub fn month(value: impl Into<String>) -> Self {
        Self {
            month: Some(value.into()),
            week: None,
        }
    }

    pub fn week(value: impl Into<String>) -> Self {
        Self {
            month: None,
            week: Some(value.into()),
        }
    }
}

/// Resolved, ordered set of period numbers of a single granularity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSet {
    pub granularity: Granularity,
    pub periods: Vec<u32>,
}

impl PeriodSet {
    fn single(granularity: Granularity, period: u32) -> Self {
        Self {
            granularity,
            periods: vec![period],
        }
    }

    pub fn contains(&self, period: u32) -> bool {
        self.periods.contains(&period)
    }
}

/// Errors that can occur while resolving periods
#[derive(Debug, Error, Diagnostic)]
pub enum PeriodError {
    #[error("Invalid {granularity} provided: {value:?}")]
    #[diagnostic(
        code(look_back::period::invalid),
        help("use a number, \"current\" or \"all\"")
    )]
    Invalid {
        granularity: Granularity,
        value: String,
    },
}

/// Resolve a period selector against a reference year
///
/// `today` stands in for the current date when a selector says "current".
/// Explicit months must be 1-12 and weeks 0-53. An unusable month value
/// falls back to week mode; an unusable week value is an error.
pub fn resolve(
    spec: &PeriodSpec,
    reference_year: i32,
    today: NaiveDate,
) -> Result<PeriodSet, PeriodError> {
    let month = match (&spec.month, &spec.week) {
        (None, None) => Some(CURRENT),
        (month, _) => month.as_deref(),
    };

    if let Some(month) = month {
        match month.trim() {
            CURRENT => return Ok(PeriodSet::single(Granularity::Month, today.month())),
            // 12 is left out of "all" and is pinned by a regression test
            ALL => {
                return Ok(PeriodSet {
                    granularity: Granularity::Month,
                    periods: (1..12).collect(),
                })
            }
            value => match value.parse::<u32>() {
                Ok(n) if (1..=12).contains(&n) => {
                    return Ok(PeriodSet::single(Granularity::Month, n))
                }
                _ => tracing::warn!(
                    month = value,
                    "Invalid month provided, falling back to use week"
                ),
            },
        }
    }

    let week = spec.week.as_deref().map(str::trim);
    match week {
        Some(CURRENT) => Ok(PeriodSet::single(Granularity::Week, sunday_week_number(today))),
        Some(ALL) => {
            let last = weeks_in_year(reference_year);
            Ok(PeriodSet {
                granularity: Granularity::Week,
                periods: (1..last).collect(),
            })
        }
        Some(value) => match value.parse::<u32>() {
            Ok(n) if n <= MAX_WEEK => Ok(PeriodSet::single(Granularity::Week, n)),
            _ => Err(PeriodError::Invalid {
                granularity: Granularity::Week,
                value: value.to_string(),
            }),
        },
        None => Err(PeriodError::Invalid {
            granularity: Granularity::Month,
            value: month.unwrap_or_default().to_string(),
        }),
    }
}

/// `[Y-1, Y-5, Y-10]` for reference year `Y`
pub fn look_back_years(reference_year: i32) -> [i32; 3] {
    LOOK_BACK_OFFSETS.map(|offset| reference_year - offset)
}

/// Sunday-first week number (`%U`): week 1 begins on the year's first Sunday
pub fn sunday_week_number(date: NaiveDate) -> u32 {
    let yday = date.ordinal0();
    let wday = date.weekday().num_days_from_sunday();
    (yday + 7 - wday) / 7
}

/// Week number of December 31st of `year`
pub fn weeks_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(sunday_week_number)
        .unwrap_or(52)
}

/// Calendar date naming a period of the reference year
///
/// Months map to their first day. Weeks map to the Sunday that opens them,
/// which for week 0 lies in the previous year. A year that starts on a
/// Sunday has an empty week 0, which maps to January 1st.
pub fn cell_date(
    reference_year: i32,
    period: u32,
    granularity: Granularity,
) -> Option<NaiveDate> {
    match granularity {
        Granularity::Month => NaiveDate::from_ymd_opt(reference_year, period, 1),
        Granularity::Week => {
            let jan1 = NaiveDate::from_ymd_opt(reference_year, 1, 1)?;
            let to_first_sunday = (7 - jan1.weekday().num_days_from_sunday()) % 7;
            if period == 0 && to_first_sunday == 0 {
                return Some(jan1);
            }
            let offset = i64::from(to_first_sunday) + 7 * (i64::from(period) - 1);
            jan1.checked_add_signed(Duration::days(offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_current_month() {
        let set = resolve(&PeriodSpec::default(), 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set.granularity, Granularity::Month);
        assert_eq!(set.periods, vec![6]);
    }

    #[test]
    fn test_current_week_uses_injected_date() {
        // 2024-06-15 is a Saturday in week 23
        let set = resolve(&PeriodSpec::week("current"), 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set.granularity, Granularity::Week);
        assert_eq!(set.periods, vec![sunday_week_number(date(2024, 6, 15))]);
        assert_eq!(set.periods, vec![23]);
    }

    #[test]
    fn test_all_months_stops_at_eleven() {
        let set = resolve(&PeriodSpec::month("all"), 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set.periods, (1..=11).collect::<Vec<_>>());
        assert!(!set.contains(12));
    }

    #[test]
    fn test_all_weeks_excludes_last_week() {
        // Dec 31 2024 is in week 52
        assert_eq!(weeks_in_year(2024), 52);
        let set = resolve(&PeriodSpec::week("all"), 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set.periods.first(), Some(&1));
        assert_eq!(set.periods.last(), Some(&51));
        assert!(!set.contains(0));
        assert!(!set.contains(52));
    }

    #[test]
    fn test_explicit_values() {
        let today = date(2024, 6, 15);
        assert_eq!(
            resolve(&PeriodSpec::month("7"), 2024, today).unwrap(),
            PeriodSet::single(Granularity::Month, 7)
        );
        assert_eq!(
            resolve(&PeriodSpec::week("0"), 2024, today).unwrap(),
            PeriodSet::single(Granularity::Week, 0)
        );
    }

    #[test]
    fn test_invalid_month_falls_back_to_week() {
        let spec = PeriodSpec {
            month: Some("abc".to_string()),
            week: Some("12".to_string()),
        };
        let set = resolve(&spec, 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set, PeriodSet::single(Granularity::Week, 12));
    }

    #[test]
    fn test_month_wins_over_week() {
        let spec = PeriodSpec {
            month: Some("3".to_string()),
            week: Some("12".to_string()),
        };
        let set = resolve(&spec, 2024, date(2024, 6, 15)).unwrap();
        assert_eq!(set, PeriodSet::single(Granularity::Month, 3));
    }

    #[test]
    fn test_invalid_values_fail() {
        let today = date(2024, 6, 15);
        assert!(matches!(
            resolve(&PeriodSpec::month("abc"), 2024, today),
            Err(PeriodError::Invalid { granularity: Granularity::Month, .. })
        ));
        assert!(matches!(
            resolve(&PeriodSpec::month("0"), 2024, today),
            Err(PeriodError::Invalid { .. })
        ));
        assert!(matches!(
            resolve(&PeriodSpec::week("abc"), 2024, today),
            Err(PeriodError::Invalid { granularity: Granularity::Week, .. })
        ));
        assert!(matches!(
            resolve(&PeriodSpec::week("-3"), 2024, today),
            Err(PeriodError::Invalid { .. })
        ));
        assert!(matches!(
            resolve(&PeriodSpec::week("54"), 2024, today),
            Err(PeriodError::Invalid { .. })
        ));
        assert!(matches!(
            resolve(&PeriodSpec::month("13"), 2024, today),
            Err(PeriodError::Invalid { granularity: Granularity::Month, .. })
        ));
    }

    #[test]
    fn test_look_back_years() {
        assert_eq!(look_back_years(2024), [2023, 2019, 2014]);
    }

    #[test]
    fn test_sunday_week_number() {
        // 2023-01-01 is a Sunday: week 1 starts immediately
        assert_eq!(sunday_week_number(date(2023, 1, 1)), 1);
        // 2024-01-01 is a Monday: week 0 until the first Sunday (Jan 7)
        assert_eq!(sunday_week_number(date(2024, 1, 1)), 0);
        assert_eq!(sunday_week_number(date(2024, 1, 6)), 0);
        assert_eq!(sunday_week_number(date(2024, 1, 7)), 1);
        assert_eq!(sunday_week_number(date(2024, 12, 31)), 52);
    }

    #[test]
    fn test_cell_date() {
        assert_eq!(cell_date(2024, 6, Granularity::Month), Some(date(2024, 6, 1)));
        assert_eq!(cell_date(2024, 13, Granularity::Month), None);
        assert_eq!(cell_date(2024, 1, Granularity::Week), Some(date(2024, 1, 7)));
        assert_eq!(cell_date(2024, 23, Granularity::Week), Some(date(2024, 6, 9)));
        assert_eq!(cell_date(2024, 0, Granularity::Week), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_cell_date_empty_week_zero() {
        // 2023-01-01 is a Sunday, so week 1 starts on Jan 1 and week 0 is empty
        assert_eq!(cell_date(2023, 0, Granularity::Week), Some(date(2023, 1, 1)));
        assert_eq!(cell_date(2023, 1, Granularity::Week), Some(date(2023, 1, 1)));
        assert_eq!(cell_date(2017, 0, Granularity::Week), Some(date(2017, 1, 1)));
    }
}
