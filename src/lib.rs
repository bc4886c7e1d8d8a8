#![doc(test(attr(deny(warnings))))]

//! Cashflow Core expands recurring obligations into dated occurrences, merges
//! them with one-off expenses and income, and computes the window-scoped
//! statistics and pages that power reporting dashboards.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use errors::{EngineError, EngineResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}
