//! Request-level services composing the ledger building blocks.

pub mod services;

pub use services::{
    DashboardReport, DashboardService, ReportRequest, ReportService, WindowReport,
};
