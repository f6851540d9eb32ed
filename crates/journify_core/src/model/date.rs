//! Canonical calendar-day key.
//!
//! # Responsibility
//! - Parse and format the `YYYY-MM-DD` strings used as keys by every record kind.
//! - Provide the day arithmetic and labels needed by derived views.
//!
//! # Invariants
//! - A `DayKey` always formats back to exactly the string it was parsed from.
//! - No time component, no timezone; "today" is always supplied by the caller.

use crate::model::validation::ValidationError;
use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid day key regex"));

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// One calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Parses a canonical day string exactly as given.
    ///
    /// Rejects surrounding whitespace, non-padded forms (`2024-3-1`) and
    /// impossible days (`2024-02-30`).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if !DAY_KEY_RE.is_match(value) {
            return Err(ValidationError::InvalidDate(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate(value.to_string()))
    }

    /// Parses a day typed by the user, ignoring surrounding whitespace.
    pub fn parse_input(value: &str) -> Result<Self, ValidationError> {
        Self::parse(value.trim())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the day `days` before this one, saturating at the calendar minimum.
    pub fn days_before(self, days: u64) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    /// Full English month name, e.g. `March`.
    pub fn month_label(self) -> String {
        self.0.format("%B").to_string()
    }

    /// Three-letter English weekday, e.g. `Tue`.
    pub fn weekday_label(self) -> String {
        self.0.format("%a").to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
