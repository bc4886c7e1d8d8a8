pub mod dashboard_service;
pub mod report_service;

pub use dashboard_service::{DashboardReport, DashboardService};
pub use report_service::{ReportRequest, ReportService, WindowReport};
