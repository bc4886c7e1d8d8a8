//! Merges expenses, fixed-obligation occurrences and income into one ledger.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::expander::expand;
use super::normalizer::RecurrenceNormalizer;
use crate::domain::{
    AdHocRecord, FixedObligation, QueryWindow, RecordKind, SourceType, Transaction,
};
use crate::errors::EngineResult;
use crate::storage::LedgerSource;

/// Row ordering for the merged ledger. Every variant ends with an id
/// tie-break so pages are stable across requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    DescriptionAsc,
}

impl LedgerOrder {
    /// Parses a sort key; unknown keys fall back to newest first.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "date_asc" => LedgerOrder::DateAsc,
            "amount_desc" => LedgerOrder::AmountDesc,
            "amount_asc" => LedgerOrder::AmountAsc,
            "description_asc" => LedgerOrder::DescriptionAsc,
            _ => LedgerOrder::DateDesc,
        }
    }

    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self {
            LedgerOrder::DateDesc => b.date.cmp(&a.date),
            LedgerOrder::DateAsc => a.date.cmp(&b.date),
            LedgerOrder::AmountDesc => b.amount.cmp(&a.amount).then(b.date.cmp(&a.date)),
            LedgerOrder::AmountAsc => a.amount.cmp(&b.amount).then(b.date.cmp(&a.date)),
            LedgerOrder::DescriptionAsc => a
                .description
                .cmp(&b.description)
                .then(b.date.cmp(&a.date)),
        };
        let id = match self {
            LedgerOrder::DateAsc => a.id.cmp(&b.id),
            _ => b.id.cmp(&a.id),
        };
        primary
            .then(id)
            .then(a.source_type.cmp(&b.source_type))
    }
}

/// Which rows make it into the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub category: Option<String>,
    /// Selected sources; empty selects all of them.
    pub sources: BTreeSet<SourceType>,
    pub order: LedgerOrder,
}

impl LedgerFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = SourceType>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    pub fn with_order(mut self, order: LedgerOrder) -> Self {
        self.order = order;
        self
    }

    pub fn includes(&self, source: SourceType) -> bool {
        self.sources.is_empty() || self.sources.contains(&source)
    }

    /// Category predicate applied identically to every source.
    pub fn matches_category(&self, category: Option<&str>) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// Builds the merged, sorted ledger for `window`.
pub fn build_ledger(
    source: &dyn LedgerSource,
    window: &QueryWindow,
    filter: &LedgerFilter,
    normalizer: &RecurrenceNormalizer,
) -> EngineResult<Vec<Transaction>> {
    let mut ledger = Vec::new();

    if filter.includes(SourceType::VariableExpense) {
        let expenses = source.fetch_expenses(window)?;
        ledger.extend(tag_records(&expenses, RecordKind::Expense, window, filter)?);
    }

    if filter.includes(SourceType::FixedOccurrence) {
        let obligations = source.fetch_fixed_obligations(true, window.end())?;
        ledger.extend(expand_obligations(
            &obligations,
            window,
            filter.category.as_deref(),
            normalizer,
        )?);
    }

    if filter.includes(SourceType::Income) {
        let income = source.fetch_income(window)?;
        ledger.extend(tag_records(&income, RecordKind::Income, window, filter)?);
    }

    ledger.sort_by(|a, b| filter.order.compare(a, b));
    info!(
        start = %window.start(),
        end = %window.end(),
        rows = ledger.len(),
        "built ledger"
    );
    Ok(ledger)
}

fn tag_records(
    records: &[AdHocRecord],
    kind: RecordKind,
    window: &QueryWindow,
    filter: &LedgerFilter,
) -> EngineResult<Vec<Transaction>> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        record.validate(kind)?;
        if window.contains(record.date) && filter.matches_category(record.category.as_deref()) {
            rows.push(Transaction::from_record(record));
        }
    }
    Ok(rows)
}

/// Expands active obligations starting by `window.end` into dated rows.
///
/// Obligations with an unrecognized recurrence label are skipped (or fail,
/// for strict normalizers).
pub fn expand_obligations(
    obligations: &[FixedObligation],
    window: &QueryWindow,
    category: Option<&str>,
    normalizer: &RecurrenceNormalizer,
) -> EngineResult<Vec<Transaction>> {
    let mut rows = Vec::new();
    for obligation in obligations {
        if !obligation.active || obligation.start_date > window.end() {
            continue;
        }
        obligation.validate()?;
        if category.is_some() && obligation.category.as_deref() != category {
            continue;
        }
        let Some(recurrence) =
            normalizer.recurrence_for(obligation.id, &obligation.recurrence_label)?
        else {
            debug!(id = obligation.id, "skipping obligation without a usable recurrence");
            continue;
        };
        let dates = expand(obligation.start_date, &recurrence, window);
        debug!(
            id = obligation.id,
            occurrences = dates.len(),
            "expanded fixed obligation"
        );
        rows.extend(
            dates
                .into_iter()
                .map(|date| Transaction::occurrence(obligation, date)),
        );
    }
    Ok(rows)
}
