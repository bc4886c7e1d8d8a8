//! Calendar arithmetic for stepping recurrence rules.
//!
//! Month shifts clamp the day-of-month to the last day of the target month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{RecurrenceKind, RecurrenceRule};

impl RecurrenceRule {
    /// The `steps`-th occurrence counted from `anchor` (step 0 is the anchor).
    ///
    /// Always computed from the anchor, so a clamped month never shortens the
    /// day used by later steps.
    pub fn step_from(&self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let count = i32::try_from(steps.checked_mul(self.interval())?).ok()?;
        match self.kind() {
            RecurrenceKind::Monthly => shift_month(anchor, count),
            RecurrenceKind::Yearly => shift_year(anchor, count),
        }
    }

    /// Number of whole steps from `anchor` that land strictly before the month
    /// of `reference`. Lets expansion skip straight to the window.
    pub(crate) fn steps_before(&self, anchor: NaiveDate, reference: NaiveDate) -> u32 {
        let diff = month_index(reference) - month_index(anchor);
        if diff <= 0 {
            return 0;
        }
        let per_step = i64::from(self.months_per_step().max(1));
        let whole = (diff - 1) / per_step;
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}

pub(crate) fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Shifts by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    on_day_clamped(year, month, date.day())
}

/// Shifts by whole years, so Feb 29 lands on Feb 28 in common years.
pub fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    on_day_clamped(year, date.month(), date.day())
}

/// Builds `year-month-day`, using the month's last day when `day` overflows.
pub fn on_day_clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((first_next - Duration::days(1)).day())
}
