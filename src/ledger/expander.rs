//! Turns a start date plus recurrence into concrete dates.
//!
//! Two independent operations live here: window expansion (interval stepping
//! from the start date) and [`next_due_date`] (day-of-month replacement in the
//! current month). They answer different questions and may disagree.

use chrono::{Datelike, NaiveDate};

use super::time_interval::{on_day_clamped, shift_month};
use crate::domain::{QueryWindow, Recurrence, RecurrenceRule};

/// Occurrence dates of `recurrence` inside `window`, ascending.
///
/// Every returned date is `>= max(start, window.start)` and `<= window.end`.
pub fn expand(start: NaiveDate, recurrence: &Recurrence, window: &QueryWindow) -> Vec<NaiveDate> {
    match recurrence {
        Recurrence::SingleOccurrence => {
            if window.contains(start) {
                vec![start]
            } else {
                Vec::new()
            }
        }
        Recurrence::Rule(rule) => expand_rule(start, rule, window),
    }
}

fn expand_rule(start: NaiveDate, rule: &RecurrenceRule, window: &QueryWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if start > window.end() {
        return dates;
    }
    let mut step = rule.steps_before(start, window.start());
    while let Some(date) = rule.step_from(start, step) {
        if date > window.end() {
            break;
        }
        if date >= window.start() {
            dates.push(date);
        }
        step = match step.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Next due date relative to `today`, as shown in "upcoming" views.
///
/// Takes `start`'s day-of-month in today's month (clamped to the month end);
/// when that is already past, moves one rule interval forward.
pub fn next_due_date(start: NaiveDate, rule: &RecurrenceRule, today: NaiveDate) -> Option<NaiveDate> {
    let due_day = start.day();
    let this_month = on_day_clamped(today.year(), today.month(), due_day)?;
    if this_month >= today {
        return Some(this_month);
    }
    let months = i32::try_from(rule.months_per_step()).ok()?;
    let first_of_month = today.with_day(1)?;
    let target = shift_month(first_of_month, months)?;
    on_day_clamped(target.year(), target.month(), due_day)
}
