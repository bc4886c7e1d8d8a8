//! The persistence collaborator seen from the engine: a read-only,
//! per-tenant record source.

pub mod json_backend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AdHocRecord, FixedObligation, QueryWindow, RecordKind, Reminder};
use crate::errors::EngineResult;

/// Abstraction over one tenant partition of stored records.
pub trait LedgerSource {
    /// Expense records dated inside `window`.
    fn fetch_expenses(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>>;

    /// Obligations starting on or before `as_of`, optionally only active ones.
    fn fetch_fixed_obligations(
        &self,
        active_only: bool,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<FixedObligation>>;

    /// Income records dated inside `window`.
    fn fetch_income(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>>;

    fn fetch_reminders(&self) -> EngineResult<Vec<Reminder>> {
        Ok(Vec::new())
    }
}

/// Every record of one tenant, as stored in JSON fixtures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub records: Vec<AdHocRecord>,
    #[serde(default)]
    pub fixed_obligations: Vec<FixedObligation>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// Answers [`LedgerSource`] queries from records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: LedgerSnapshot,
}

impl InMemorySource {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn with_record(mut self, record: AdHocRecord) -> Self {
        self.snapshot.records.push(record);
        self
    }

    pub fn with_obligation(mut self, obligation: FixedObligation) -> Self {
        self.snapshot.fixed_obligations.push(obligation);
        self
    }

    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.snapshot.reminders.push(reminder);
        self
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    fn records_of(&self, kind: RecordKind, window: &QueryWindow) -> Vec<AdHocRecord> {
        self.snapshot
            .records
            .iter()
            .filter(|record| record.kind == kind && window.contains(record.date))
            .cloned()
            .collect()
    }
}

impl LedgerSource for InMemorySource {
    fn fetch_expenses(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>> {
        Ok(self.records_of(RecordKind::Expense, window))
    }

    fn fetch_fixed_obligations(
        &self,
        active_only: bool,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<FixedObligation>> {
        Ok(self
            .snapshot
            .fixed_obligations
            .iter()
            .filter(|obligation| !active_only || obligation.active)
            .filter(|obligation| obligation.start_date <= as_of)
            .cloned()
            .collect())
    }

    fn fetch_income(&self, window: &QueryWindow) -> EngineResult<Vec<AdHocRecord>> {
        Ok(self.records_of(RecordKind::Income, window))
    }

    fn fetch_reminders(&self) -> EngineResult<Vec<Reminder>> {
        Ok(self.snapshot.reminders.clone())
    }
}

pub use json_backend::{load_snapshot_from_path, save_snapshot_to_path, JsonSource};
