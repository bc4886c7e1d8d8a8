//! The uniform ledger row produced by merging every record source.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::records::{AdHocRecord, FixedObligation, RecordKind};

/// Origin of a ledger row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    VariableExpense,
    FixedOccurrence,
    Income,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [
        SourceType::VariableExpense,
        SourceType::FixedOccurrence,
        SourceType::Income,
    ];

    pub fn is_expense(self) -> bool {
        !matches!(self, SourceType::Income)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceType::VariableExpense => "Variable expense",
            SourceType::FixedOccurrence => "Fixed expense",
            SourceType::Income => "Income",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Tags a one-off record with the source type matching its kind.
    pub fn from_record(record: &AdHocRecord) -> Self {
        let source_type = match record.kind {
            RecordKind::Expense => SourceType::VariableExpense,
            RecordKind::Income => SourceType::Income,
        };
        Self {
            id: record.id,
            date: record.date,
            description: record.description.clone(),
            category: record.category.clone(),
            amount: record.amount,
            source_type,
            payment_method: record.payment_method.clone(),
        }
    }

    /// One dated occurrence of a fixed obligation.
    pub fn occurrence(obligation: &FixedObligation, date: NaiveDate) -> Self {
        Self {
            id: obligation.id,
            date,
            description: obligation.description.clone(),
            category: obligation.category.clone(),
            amount: obligation.amount,
            source_type: SourceType::FixedOccurrence,
            payment_method: None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.source_type.is_expense()
    }
}
