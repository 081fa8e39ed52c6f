//! Shared helper functions for CLI output

use crate::core::period::Granularity;
use crate::core::report::ReportCell;

/// "1 year ago", "5 years ago"
pub fn years_ago_label(years: i32) -> String {
    if years == 1 {
        "1 year ago".to_string()
    } else {
        format!("{} years ago", years)
    }
}

/// Human-readable period of a cell, e.g. "Jun 2019" or "Week 23, 2019"
pub fn cell_label(cell: &ReportCell) -> String {
    match cell.granularity {
        Granularity::Month => match month_abbrev(cell.period) {
            Some(name) => format!("{} {}", name, cell.year),
            None => format!("Month {}, {}", cell.period, cell.year),
        },
        Granularity::Week => format!("Week {}, {}", cell.period, cell.year),
    }
}

fn month_abbrev(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(year: i32, period: u32, granularity: Granularity) -> ReportCell {
        ReportCell {
            reference_year: 2024,
            year,
            period,
            granularity,
        }
    }

    #[test]
    fn test_years_ago_label() {
        assert_eq!(years_ago_label(1), "1 year ago");
        assert_eq!(years_ago_label(10), "10 years ago");
    }

    #[test]
    fn test_cell_label() {
        assert_eq!(cell_label(&cell(2019, 6, Granularity::Month)), "Jun 2019");
        assert_eq!(cell_label(&cell(2019, 0, Granularity::Month)), "Month 0, 2019");
        assert_eq!(cell_label(&cell(2014, 23, Granularity::Week)), "Week 23, 2014");
    }
}
