#![allow(dead_code)]

use std::sync::Mutex;

use cashflow_core::config::ConfigManager;
use cashflow_core::domain::{AdHocRecord, FixedObligation, Reminder};
use cashflow_core::storage::{save_snapshot_to_path, JsonSource, LedgerSnapshot};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// One tenant with a month of mixed activity in March 2024.
pub fn sample_snapshot() -> LedgerSnapshot {
    LedgerSnapshot {
        records: vec![
            AdHocRecord::income(1, day(2024, 3, 1), "Salary", dec!(4200)).with_category("Work"),
            AdHocRecord::expense(2, day(2024, 3, 2), "Groceries", dec!(86.40))
                .with_category("Food")
                .with_payment_method("Debit"),
            AdHocRecord::expense(3, day(2024, 3, 8), "Bus pass", dec!(45))
                .with_category("Transport"),
            AdHocRecord::expense(4, day(2024, 3, 15), "Dinner", dec!(62.10))
                .with_category("Food")
                .with_payment_method("Credit"),
            AdHocRecord::expense(5, day(2024, 4, 2), "Groceries", dec!(91)).with_category("Food"),
        ],
        fixed_obligations: vec![
            FixedObligation::new(10, "Rent", dec!(1500), day(2023, 10, 31), "mensal")
                .with_category("Housing"),
            FixedObligation::new(11, "Streaming", dec!(12.99), day(2024, 1, 10), "Mensual")
                .with_category("Leisure"),
            FixedObligation::new(12, "Car tax", dec!(300), day(2023, 3, 20), "anual")
                .with_category("Transport"),
            FixedObligation::new(13, "Old gym", dec!(40), day(2023, 1, 1), "monthly").inactive(),
        ],
        reminders: vec![
            Reminder::once(20, "Return library book", day(2024, 3, 12)),
            Reminder::repeating(21, "Credit card", day(2024, 1, 25), Some("mensal"))
                .with_amount(dec!(300)),
        ],
    }
}

/// Writes `snapshot` into a fresh directory and opens it as a source.
pub fn json_source(snapshot: &LedgerSnapshot) -> JsonSource {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("ledger.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    save_snapshot_to_path(snapshot, &path).expect("write fixture");
    JsonSource::load(path).expect("load fixture")
}

/// Config manager rooted in an isolated directory.
pub fn config_manager() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}
