//! Inclusive reporting windows and the dashboard period presets.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Defines an inclusive reporting window; `start <= end` always holds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct QueryWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl QueryWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// A window covering exactly one date.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar dates in the window, both ends included.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every date of the window in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}

/// Named windows offered by the dashboard, all ending today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodPreset {
    #[default]
    CurrentMonth,
    Last15Days,
    Last7Days,
}

impl PeriodPreset {
    /// Parses a preset key; anything unknown falls back to the current month.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "last_15_days" | "15d" => PeriodPreset::Last15Days,
            "last_7_days" | "7d" => PeriodPreset::Last7Days,
            _ => PeriodPreset::CurrentMonth,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PeriodPreset::CurrentMonth => "current_month",
            PeriodPreset::Last15Days => "last_15_days",
            PeriodPreset::Last7Days => "last_7_days",
        }
    }

    pub fn window(&self, today: NaiveDate) -> QueryWindow {
        let start = match self {
            PeriodPreset::CurrentMonth => today.with_day(1).unwrap_or(today),
            PeriodPreset::Last15Days => today - Duration::days(14),
            PeriodPreset::Last7Days => today - Duration::days(6),
        };
        QueryWindow { start, end: today }
    }
}
