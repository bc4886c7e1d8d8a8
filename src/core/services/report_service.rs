use serde::Serialize;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{QueryWindow, Transaction};
use crate::errors::EngineResult;
use crate::ledger::{
    aggregate, build_ledger, paginate, AggregationResult, ChartSeries, LedgerFilter, Page,
    RecurrenceNormalizer,
};
use crate::storage::LedgerSource;

/// Parameters of one report page view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub window: QueryWindow,
    pub filter: LedgerFilter,
    /// 1-based; clamped when out of range.
    pub page: usize,
}

impl ReportRequest {
    pub fn new(window: QueryWindow) -> Self {
        Self {
            window,
            filter: LedgerFilter::all(),
            page: 1,
        }
    }

    pub fn with_filter(mut self, filter: LedgerFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WindowReport {
    pub window: QueryWindow,
    pub statistics: AggregationResult,
    pub chart: ChartSeries,
    pub page: Page<Transaction>,
}

pub struct ReportService;

impl ReportService {
    /// Builds the filtered ledger once and derives statistics and the
    /// requested page from it.
    pub fn window_report(
        source: &dyn LedgerSource,
        request: &ReportRequest,
        config: &EngineConfig,
    ) -> EngineResult<WindowReport> {
        let normalizer = RecurrenceNormalizer::from_config(config);
        let ledger = build_ledger(source, &request.window, &request.filter, &normalizer)?;
        let statistics = aggregate(&ledger, &request.window);
        let chart = statistics.chart(&config.chart_label_format);
        let page = paginate(&ledger, request.page, config.page_size);
        info!(
            rows = ledger.len(),
            page = page.current_page,
            total_pages = page.total_pages,
            "window report ready"
        );
        Ok(WindowReport {
            window: request.window,
            statistics,
            chart,
            page,
        })
    }
}
