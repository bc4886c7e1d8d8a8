use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::PeriodPreset;

/// Tunables for reporting, pagination and recurrence handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "EngineConfig::default_page_size")]
    pub page_size: usize,
    /// strftime pattern used for chart labels.
    #[serde(default = "EngineConfig::default_chart_label_format")]
    pub chart_label_format: String,
    #[serde(default = "EngineConfig::default_upcoming_horizon_days")]
    pub upcoming_horizon_days: u32,
    /// Share of income that may be spent per day when computing the savings allowance.
    #[serde(default = "EngineConfig::default_savings_rate")]
    pub savings_rate: Decimal,
    #[serde(default = "EngineConfig::default_savings_days")]
    pub savings_days: u32,
    #[serde(default = "EngineConfig::default_unspecified_payment_label")]
    pub unspecified_payment_label: String,
    /// Surface unknown recurrence labels as errors instead of dropping or
    /// defaulting them.
    #[serde(default)]
    pub strict_recurrence: bool,
    /// Extra labels mapped onto a canonical token such as `monthly` or `once`.
    #[serde(default)]
    pub recurrence_aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub default_period: PeriodPreset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
            chart_label_format: Self::default_chart_label_format(),
            upcoming_horizon_days: Self::default_upcoming_horizon_days(),
            savings_rate: Self::default_savings_rate(),
            savings_days: Self::default_savings_days(),
            unspecified_payment_label: Self::default_unspecified_payment_label(),
            strict_recurrence: false,
            recurrence_aliases: BTreeMap::new(),
            default_period: PeriodPreset::default(),
        }
    }
}

impl EngineConfig {
    pub fn default_page_size() -> usize {
        30
    }

    pub fn default_chart_label_format() -> String {
        "%d/%m".into()
    }

    pub fn default_upcoming_horizon_days() -> u32 {
        7
    }

    pub fn default_savings_rate() -> Decimal {
        dec!(0.7)
    }

    pub fn default_savings_days() -> u32 {
        30
    }

    pub fn default_unspecified_payment_label() -> String {
        "Unspecified".into()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be at least 1"));
        }
        if self.savings_days == 0 {
            return Err(ConfigError::invalid("savings_days", "must be at least 1"));
        }
        if self.savings_rate < Decimal::ZERO || self.savings_rate > Decimal::ONE {
            return Err(ConfigError::invalid(
                "savings_rate",
                format!("must be between 0 and 1, got {}", self.savings_rate),
            ));
        }
        let bad_format = self.chart_label_format.is_empty()
            || StrftimeItems::new(&self.chart_label_format).any(|item| matches!(item, Item::Error));
        if bad_format {
            return Err(ConfigError::invalid(
                "chart_label_format",
                format!("`{}` is not a valid date pattern", self.chart_label_format),
            ));
        }
        Ok(())
    }
}
