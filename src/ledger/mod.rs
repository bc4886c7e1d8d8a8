//! Recurrence expansion, ledger merging and period statistics.

pub mod aggregator;
pub mod expander;
pub mod normalizer;
pub mod paginator;
pub mod schedule;
pub mod statistics;
pub mod time_interval;

pub use aggregator::{build_ledger, expand_obligations, LedgerFilter, LedgerOrder};
pub use expander::{expand, next_due_date};
pub use normalizer::{normalize, CanonicalTerm, RecurrenceNormalizer};
pub use paginator::{paginate, Page};
pub use schedule::{
    group_reminders, project_current_month, DueBucket, MonthlyProjection, ProjectedObligation,
    ReminderGroups, ScheduledReminder,
};
pub use statistics::{
    aggregate, average_per_elapsed_day, average_per_record, AggregationResult, ChartSeries,
    PeriodChart, PeriodSummary,
};
