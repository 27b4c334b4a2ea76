//! `YYYY-MM` month keys used to bucket metric counters.
//!
//! # Invariants
//! - A `MonthKey` always holds a month in `1..=12`.
//! - Formatting is zero-padded (`2026-01`).

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MONTH_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month key regex"));

/// Rejected month key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthKeyError(pub String);

impl Display for MonthKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month key `{}`; expected YYYY-MM", self.0)
    }
}

impl Error for MonthKeyError {}

/// Calendar month identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Builds a key from parts, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, MonthKeyError> {
        let trimmed = value.trim();
        let invalid = || MonthKeyError(trimmed.to_string());
        let captures = MONTH_KEY_RE.captures(trimmed).ok_or_else(invalid)?;
        let year = captures[1].parse::<i32>().map_err(|_| invalid())?;
        let month = captures[2].parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    /// Month containing the local current date.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Offsets by whole months, rolling over year boundaries.
    pub fn shift(self, offset_months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(offset_months);
        // Year range of i32 is far beyond any reachable offset.
        let year = index.div_euclid(12) as i32;
        let month = index.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    /// The twelve keys of `year`, January first.
    pub fn months_of_year(year: i32) -> impl Iterator<Item = MonthKey> {
        (1..=12).map(move |month| MonthKey { year, month })
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Shifts a `YYYY-MM` string by `offset_months`.
pub fn shift_month(month_key: &str, offset_months: i32) -> Result<String, MonthKeyError> {
    Ok(MonthKey::parse(month_key)?.shift(offset_months).to_string())
}
