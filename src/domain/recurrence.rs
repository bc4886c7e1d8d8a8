//! Canonical recurrence rules derived from free-text labels.

use std::fmt;

use serde::Serialize;

/// Calendar unit a rule steps by.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceKind {
    Monthly,
    Yearly,
}

/// A repetition cadence: every `interval` months or years.
///
/// The interval is always at least one; rules are only built through
/// [`RecurrenceRule::new`] or the named constructors.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct RecurrenceRule {
    kind: RecurrenceKind,
    interval: u32,
}

impl RecurrenceRule {
    pub const MONTHLY: RecurrenceRule = RecurrenceRule::fixed(RecurrenceKind::Monthly, 1);
    pub const BIMONTHLY: RecurrenceRule = RecurrenceRule::fixed(RecurrenceKind::Monthly, 2);
    pub const QUARTERLY: RecurrenceRule = RecurrenceRule::fixed(RecurrenceKind::Monthly, 3);
    pub const SEMIANNUAL: RecurrenceRule = RecurrenceRule::fixed(RecurrenceKind::Monthly, 6);
    pub const YEARLY: RecurrenceRule = RecurrenceRule::fixed(RecurrenceKind::Yearly, 1);

    const fn fixed(kind: RecurrenceKind, interval: u32) -> Self {
        Self { kind, interval }
    }

    /// Builds a rule, rejecting a zero interval.
    pub fn new(kind: RecurrenceKind, interval: u32) -> Option<Self> {
        (interval >= 1).then_some(Self { kind, interval })
    }

    pub fn kind(&self) -> RecurrenceKind {
        self.kind
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Number of calendar months covered by one step.
    pub fn months_per_step(&self) -> u32 {
        match self.kind {
            RecurrenceKind::Monthly => self.interval,
            RecurrenceKind::Yearly => self.interval.saturating_mul(12),
        }
    }

    pub fn label(&self) -> String {
        match (self.kind, self.interval) {
            (RecurrenceKind::Monthly, 1) => "Monthly".into(),
            (RecurrenceKind::Monthly, 2) => "Bimonthly".into(),
            (RecurrenceKind::Monthly, 3) => "Quarterly".into(),
            (RecurrenceKind::Monthly, 6) => "Semiannual".into(),
            (RecurrenceKind::Yearly, 1) => "Yearly".into(),
            (RecurrenceKind::Monthly, n) => format!("Every {} Months", n),
            (RecurrenceKind::Yearly, n) => format!("Every {} Years", n),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// What an obligation does over time: repeat by a rule, or happen once.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Recurrence {
    Rule(RecurrenceRule),
    SingleOccurrence,
}

/// Result of normalizing a free-text recurrence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {
    Rule(RecurrenceRule),
    SingleOccurrence,
    Unrecognized,
}

impl Normalized {
    /// Converts into an expandable recurrence; `None` for unrecognized labels.
    pub fn recurrence(self) -> Option<Recurrence> {
        match self {
            Normalized::Rule(rule) => Some(Recurrence::Rule(rule)),
            Normalized::SingleOccurrence => Some(Recurrence::SingleOccurrence),
            Normalized::Unrecognized => None,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Normalized::Unrecognized)
    }
}
