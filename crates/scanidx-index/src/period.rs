//! Period Codec
//!
//! Parses compact period labels of the form `Mon-YY` (`Jan-22`, `dec-23`)
//! into a canonical [`Period`]. Month abbreviations are fixed English
//! three-letter names matched without regard to ASCII case, independent of
//! the process locale. Two-digit years always land in the 2000s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, totally ordered by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period from a year and a 1-based month.
    ///
    /// Returns `None` when `month` is outside `1..=12`.
    pub const fn from_year_month(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Calendar year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year, `1..=12`.
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Same month one year earlier (the year-over-year comparison period).
    pub const fn year_earlier(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }

    /// The preceding calendar month; January rolls back to December of the
    /// previous year.
    pub const fn previous_month(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the month, if representable as a calendar date.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The compact `Mon-YY` label this period parses from.
    pub fn label(&self) -> String {
        format!(
            "{}-{:02}",
            MONTH_ABBREVIATIONS[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a `Mon-YY` period label.
///
/// Surrounding whitespace is ignored. Anything else that does not match the
/// pattern yields `None`; callers discard those rows.
///
/// # Examples
///
/// ```
/// use scanidx_index::parse_period;
///
/// let period = parse_period("Jan-22").unwrap();
/// assert_eq!((period.year(), period.month()), (2022, 1));
/// assert!(parse_period("January 2022").is_none());
/// ```
pub fn parse_period(label: &str) -> Option<Period> {
    let (month, year) = label.trim().split_once('-')?;
    if month.len() != 3 || year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| abbr.eq_ignore_ascii_case(month))?;
    let year: i32 = year.parse().ok()?;

    Period::from_year_month(2000 + year, month as u32 + 1)
}
