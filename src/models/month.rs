//! Month selection and month range resolution
//!
//! A [`Month`] is a calendar year-month. It resolves to an inclusive range
//! from the first instant of the month to 23:59:59.999 local time on its
//! last day, which is what the transaction query filter is built from.

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest and latest years accepted for a month selection
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month (e.g. "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    /// Always the first day of the month
    first: NaiveDate,
}

impl Month {
    /// Create a month, validating the month number and year
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(MonthParseError::InvalidYear(year))
    }

    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The current month according to the local clock
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last calendar day of the month
    ///
    /// Computed as the day before the first of the next month, so December
    /// rolls into January of the next year and February follows leap years.
    pub fn last_day(&self) -> NaiveDate {
        self.next().first.pred_opt().unwrap_or(self.first)
    }

    /// Number of days in the month
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// First instant of the month (00:00:00.000 local)
    pub fn start_instant(&self) -> DateTime<Local> {
        local_instant(self.first.and_time(chrono::NaiveTime::MIN), false)
    }

    /// Last instant of the month (23:59:59.999 local)
    pub fn end_instant(&self) -> DateTime<Local> {
        let naive = self
            .last_day()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or_else(|| self.last_day().and_time(chrono::NaiveTime::MIN));
        local_instant(naive, true)
    }

    /// Inclusive instant range covering the month
    pub fn range(&self) -> MonthRange {
        MonthRange {
            from: self.start_instant(),
            to: self.end_instant(),
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last_day()
    }

    /// The following month
    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// Parse a "YYYY-MM" string
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

/// Resolve a local wall-clock time to an instant
///
/// Ambiguous times (DST fold) take the earlier or later mapping as asked;
/// times in a DST gap fall back to interpreting the wall clock as UTC.
fn local_instant(naive: NaiveDateTime, latest: bool) -> DateTime<Local> {
    let mapped = Local.from_local_datetime(&naive);
    let resolved = if latest {
        mapped.latest()
    } else {
        mapped.earliest()
    };
    resolved.unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

impl Default for Month {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Inclusive [from, to] range of instants for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub from: DateTime<Local>,
    pub to: DateTime<Local>,
}

impl MonthRange {
    /// Local date of the start bound
    pub fn from_date(&self) -> NaiveDate {
        self.from.date_naive()
    }

    /// Local date of the end bound
    pub fn to_date(&self) -> NaiveDate {
        self.to.date_naive()
    }

    /// Query parameters for `GET /transactions` (local YYYY-MM-DD dates)
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("from", self.from_date().format("%Y-%m-%d").to_string()),
            ("to", self.to_date().format("%Y-%m-%d").to_string()),
        ]
    }

    /// Check if an instant lies within the range (inclusive on both ends)
    pub fn contains(&self, instant: DateTime<Local>) -> bool {
        instant >= self.from && instant <= self.to
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: {} (expected YYYY-MM)", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}
