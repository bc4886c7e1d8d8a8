//! Plain data types shared by the expansion, aggregation and reporting layers.

pub mod common;
pub mod records;
pub mod recurrence;
pub mod transaction;
pub mod window;

pub use common::RecordId;
pub use records::{AdHocRecord, FixedObligation, RecordKind, Reminder};
pub use recurrence::{Normalized, Recurrence, RecurrenceKind, RecurrenceRule};
pub use transaction::{SourceType, Transaction};
pub use window::{PeriodPreset, QueryWindow};
