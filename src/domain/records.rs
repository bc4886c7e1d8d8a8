//! Records owned by the persistence collaborator. The engine only reads them.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use crate::errors::{EngineError, EngineResult};

/// Distinguishes money going out from money coming in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Expense,
    Income,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
        };
        f.write_str(label)
    }
}

/// A one-off expense or income entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdHocRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl AdHocRecord {
    pub fn new(
        id: RecordId,
        kind: RecordKind,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            category: None,
            amount,
            kind,
            payment_method: None,
        }
    }

    pub fn expense(
        id: RecordId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self::new(id, RecordKind::Expense, date, description, amount)
    }

    pub fn income(
        id: RecordId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self::new(id, RecordKind::Income, date, description, amount)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Fails fast when the record cannot be aggregated as `expected`.
    pub fn validate(&self, expected: RecordKind) -> EngineResult<()> {
        if self.kind != expected {
            return Err(EngineError::invalid_record(
                self.id,
                format!("expected {} record, found {}", expected, self.kind),
            ));
        }
        validate_common(self.id, &self.description, self.amount)
    }
}

/// A recurring planned expense definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedObligation {
    pub id: RecordId,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub recurrence_label: String,
    #[serde(default = "FixedObligation::default_active")]
    pub active: bool,
}

impl FixedObligation {
    pub fn new(
        id: RecordId,
        description: impl Into<String>,
        amount: Decimal,
        start_date: NaiveDate,
        recurrence_label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            category: None,
            amount,
            start_date,
            recurrence_label: recurrence_label.into(),
            active: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        validate_common(self.id, &self.description, self.amount)
    }

    fn default_active() -> bool {
        true
    }
}

/// A dated note, optionally repeating, used for "what is due soon" views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: RecordId,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_kind: Option<String>,
}

impl Reminder {
    pub fn once(id: RecordId, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            description: description.into(),
            date,
            amount: None,
            repeat: false,
            repeat_kind: None,
        }
    }

    pub fn repeating(
        id: RecordId,
        description: impl Into<String>,
        date: NaiveDate,
        repeat_kind: Option<&str>,
    ) -> Self {
        Self {
            repeat: true,
            repeat_kind: repeat_kind.map(str::to_string),
            ..Self::once(id, description, date)
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}

fn validate_common(id: RecordId, description: &str, amount: Decimal) -> EngineResult<()> {
    if description.trim().is_empty() {
        return Err(EngineError::invalid_record(id, "description is empty"));
    }
    if amount <= Decimal::ZERO {
        return Err(EngineError::invalid_record(
            id,
            format!("amount must be positive, got {}", amount),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rejects_wrong_kind() {
        let record = AdHocRecord::income(7, day(2024, 3, 1), "Salary", dec!(1000));
        let err = record.validate(RecordKind::Expense).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord { id: 7, .. }));
    }

    #[test]
    fn validate_rejects_non_positive_amounts() {
        let record = AdHocRecord::expense(3, day(2024, 3, 1), "Coffee", dec!(0));
        assert!(record.validate(RecordKind::Expense).is_err());
        let obligation = FixedObligation::new(4, "Rent", dec!(-5), day(2024, 1, 1), "mensal");
        assert!(obligation.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_description() {
        let record = AdHocRecord::expense(3, day(2024, 3, 1), "   ", dec!(4.50));
        let err = record.validate(RecordKind::Expense).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn obligations_default_to_active_when_deserialized() {
        let json = r#"{
            "id": 1,
            "description": "Gym",
            "amount": "45.00",
            "start_date": "2024-01-10",
            "recurrence_label": "monthly"
        }"#;
        let obligation: FixedObligation = serde_json::from_str(json).unwrap();
        assert!(obligation.active);
        assert_eq!(obligation.amount, dec!(45.00));
        assert_eq!(obligation.category, None);
    }
}
