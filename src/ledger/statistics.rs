//! Window-scoped totals, daily series and category breakdowns.
//!
//! Accumulators are created per call and returned; nothing is shared between
//! aggregations.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::{QueryWindow, SourceType, Transaction};

/// Statistics for one set of transactions over one window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregationResult {
    pub total: Decimal,
    pub record_count: usize,
    /// One entry per window date, zero-filled.
    pub daily_series: BTreeMap<NaiveDate, Decimal>,
    pub category_totals: BTreeMap<String, Decimal>,
    /// Category with the largest total; ties go to the alphabetically first name.
    pub top_category: Option<String>,
    pub average_per_elapsed_day: Decimal,
    pub average_per_record: Decimal,
}

impl AggregationResult {
    pub fn chart(&self, label_format: &str) -> ChartSeries {
        ChartSeries::from_daily(&self.daily_series, label_format)
    }
}

/// Aggregates `transactions` over `window`. Rows dated outside the window are
/// ignored so the daily series always sums to the total.
pub fn aggregate(transactions: &[Transaction], window: &QueryWindow) -> AggregationResult {
    let mut daily_series: BTreeMap<NaiveDate, Decimal> =
        window.days().map(|date| (date, Decimal::ZERO)).collect();
    let mut category_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    let mut record_count = 0usize;

    for txn in transactions {
        let Some(bucket) = daily_series.get_mut(&txn.date) else {
            continue;
        };
        *bucket += txn.amount;
        total += txn.amount;
        record_count += 1;
        if let Some(category) = &txn.category {
            *category_totals
                .entry(category.clone())
                .or_insert(Decimal::ZERO) += txn.amount;
        }
    }

    let top_category = top_category(&category_totals);
    AggregationResult {
        total,
        record_count,
        daily_series,
        category_totals,
        top_category,
        average_per_elapsed_day: average_per_elapsed_day(total, window),
        average_per_record: average_per_record(total, record_count),
    }
}

fn top_category(totals: &BTreeMap<String, Decimal>) -> Option<String> {
    let mut best: Option<(&String, Decimal)> = None;
    // BTreeMap iterates alphabetically, so strict `>` keeps the first name on ties.
    for (name, amount) in totals {
        if best.map_or(true, |(_, top)| *amount > top) {
            best = Some((name, *amount));
        }
    }
    best.map(|(name, _)| name.clone())
}

/// `total` spread over every calendar day of the window.
pub fn average_per_elapsed_day(total: Decimal, window: &QueryWindow) -> Decimal {
    safe_div(total, Decimal::from(window.day_count()))
}

/// `total` spread over the number of records that produced it.
pub fn average_per_record(total: Decimal, count: usize) -> Decimal {
    safe_div(total, Decimal::from(count))
}

fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Parallel label/value arrays for charting, in chronological order.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn from_daily(series: &BTreeMap<NaiveDate, Decimal>, label_format: &str) -> Self {
        let mut chart = ChartSeries::default();
        for (date, amount) in series {
            chart.labels.push(format_label(*date, label_format));
            chart.values.push(to_plain(*amount));
        }
        chart
    }
}

fn format_label(date: NaiveDate, label_format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(label_format)).is_err() {
        label.clear();
        let _ = write!(label, "{}", date.format("%d/%m"));
    }
    label
}

fn to_plain(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Dashboard view of a window: income against variable and fixed spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub window: QueryWindow,
    pub income: AggregationResult,
    pub variable_expenses: AggregationResult,
    pub fixed_expenses: AggregationResult,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// Variable spending per payment method.
    pub payment_methods: BTreeMap<String, Decimal>,
    /// Daily amount that can be spent while still saving the configured share.
    pub savings_allowance: Decimal,
}

impl PeriodSummary {
    /// Splits `ledger` by source and aggregates each part over `window`.
    pub fn from_ledger(ledger: &[Transaction], window: &QueryWindow, config: &EngineConfig) -> Self {
        let rows_of = |source: SourceType| -> Vec<Transaction> {
            ledger
                .iter()
                .filter(|txn| txn.source_type == source)
                .cloned()
                .collect()
        };
        let variable_rows = rows_of(SourceType::VariableExpense);
        let income = aggregate(&rows_of(SourceType::Income), window);
        let variable_expenses = aggregate(&variable_rows, window);
        let fixed_expenses = aggregate(&rows_of(SourceType::FixedOccurrence), window);

        let mut payment_methods = BTreeMap::new();
        for txn in variable_rows.iter().filter(|txn| window.contains(txn.date)) {
            let method = txn
                .payment_method
                .clone()
                .unwrap_or_else(|| config.unspecified_payment_label.clone());
            *payment_methods.entry(method).or_insert(Decimal::ZERO) += txn.amount;
        }

        let total_expenses = variable_expenses.total + fixed_expenses.total;
        let savings_allowance = savings_allowance(income.total, config);
        Self {
            window: *window,
            balance: income.total - total_expenses,
            income,
            variable_expenses,
            fixed_expenses,
            total_expenses,
            payment_methods,
            savings_allowance,
        }
    }

    pub fn chart(&self, label_format: &str) -> PeriodChart {
        let income = ChartSeries::from_daily(&self.income.daily_series, label_format);
        let fixed = ChartSeries::from_daily(&self.fixed_expenses.daily_series, label_format);
        let expenses = self
            .variable_expenses
            .daily_series
            .iter()
            .map(|(date, amount)| {
                let fixed = self
                    .fixed_expenses
                    .daily_series
                    .get(date)
                    .copied()
                    .unwrap_or_default();
                to_plain(*amount + fixed)
            })
            .collect();
        PeriodChart {
            labels: income.labels,
            income: income.values,
            expenses,
            fixed_expenses: fixed.values,
        }
    }
}

/// Income and spending series sharing one label axis.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct PeriodChart {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
    pub fixed_expenses: Vec<f64>,
}

fn savings_allowance(income: Decimal, config: &EngineConfig) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    safe_div(income * config.savings_rate, Decimal::from(config.savings_days))
}
