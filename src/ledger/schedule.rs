//! "What is due soon" views: reminder buckets and this month's fixed spending.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::expander::next_due_date;
use super::normalizer::RecurrenceNormalizer;
use crate::domain::{FixedObligation, Recurrence, RecordId, Reminder};
use crate::errors::EngineResult;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    Overdue,
    DueToday,
    Upcoming,
    Later,
}

impl DueBucket {
    pub fn classify(date: NaiveDate, today: NaiveDate, horizon_days: u32) -> DueBucket {
        if date < today {
            return DueBucket::Overdue;
        }
        if date == today {
            return DueBucket::DueToday;
        }
        let cutoff = today + Duration::days(i64::from(horizon_days));
        if date <= cutoff {
            DueBucket::Upcoming
        } else {
            DueBucket::Later
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduledReminder {
    pub reminder: Reminder,
    /// The date shown to the user; the next due date for repeating reminders.
    pub display_date: NaiveDate,
    pub bucket: DueBucket,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReminderGroups {
    pub overdue: Vec<ScheduledReminder>,
    pub due_today: Vec<ScheduledReminder>,
    pub upcoming: Vec<ScheduledReminder>,
    pub later: Vec<ScheduledReminder>,
}

impl ReminderGroups {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.due_today.len() + self.upcoming.len() + self.later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, item: ScheduledReminder) {
        let group = match item.bucket {
            DueBucket::Overdue => &mut self.overdue,
            DueBucket::DueToday => &mut self.due_today,
            DueBucket::Upcoming => &mut self.upcoming,
            DueBucket::Later => &mut self.later,
        };
        group.push(item);
    }

    fn sort(&mut self) {
        for group in [
            &mut self.overdue,
            &mut self.due_today,
            &mut self.upcoming,
            &mut self.later,
        ] {
            group.sort_by(|a, b| {
                a.display_date
                    .cmp(&b.display_date)
                    .then_with(|| a.reminder.id.cmp(&b.reminder.id))
            });
        }
    }
}

/// Buckets reminders relative to `today`.
///
/// Repeating reminders are placed by their next due date, so they are never
/// overdue. One-off reminders keep their own date.
pub fn group_reminders(
    reminders: &[Reminder],
    today: NaiveDate,
    horizon_days: u32,
    normalizer: &RecurrenceNormalizer,
) -> EngineResult<ReminderGroups> {
    let mut groups = ReminderGroups::default();
    for reminder in reminders {
        let recurrence =
            normalizer.resolve_repeat_flag(reminder.id, reminder.repeat, reminder.repeat_kind.as_deref())?;
        let display_date = match recurrence {
            Recurrence::Rule(rule) => {
                next_due_date(reminder.date, &rule, today).unwrap_or(reminder.date)
            }
            Recurrence::SingleOccurrence => reminder.date,
        };
        groups.push(ScheduledReminder {
            reminder: reminder.clone(),
            display_date,
            bucket: DueBucket::classify(display_date, today, horizon_days),
        });
    }
    groups.sort();
    debug!(
        total = groups.len(),
        overdue = groups.overdue.len(),
        due_today = groups.due_today.len(),
        "grouped reminders"
    );
    Ok(groups)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectedObligation {
    pub obligation_id: RecordId,
    pub description: String,
    pub category: Option<String>,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MonthlyProjection {
    pub items: Vec<ProjectedObligation>,
    pub total: Decimal,
}

/// Fixed spending still expected in today's calendar month.
///
/// Rule-based obligations use [`next_due_date`]; single-occurrence ones count
/// when their start date falls in this month. Inactive obligations are skipped.
pub fn project_current_month(
    obligations: &[FixedObligation],
    today: NaiveDate,
    normalizer: &RecurrenceNormalizer,
) -> EngineResult<MonthlyProjection> {
    let mut projection = MonthlyProjection::default();
    for obligation in obligations.iter().filter(|obligation| obligation.active) {
        obligation.validate()?;
        let Some(recurrence) =
            normalizer.recurrence_for(obligation.id, &obligation.recurrence_label)?
        else {
            continue;
        };
        let due = match recurrence {
            Recurrence::Rule(rule) => next_due_date(obligation.start_date, &rule, today),
            Recurrence::SingleOccurrence => Some(obligation.start_date),
        };
        let Some(due_date) = due else {
            continue;
        };
        if !same_month(due_date, today) || due_date < obligation.start_date {
            continue;
        }
        projection.total += obligation.amount;
        projection.items.push(ProjectedObligation {
            obligation_id: obligation.id,
            description: obligation.description.clone(),
            category: obligation.category.clone(),
            amount: obligation.amount,
            due_date,
        });
    }
    projection
        .items
        .sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.obligation_id.cmp(&b.obligation_id)));
    Ok(projection)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
