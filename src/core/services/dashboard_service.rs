use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{PeriodPreset, QueryWindow, SourceType, Transaction};
use crate::errors::EngineResult;
use crate::ledger::{
    build_ledger, group_reminders, project_current_month, LedgerFilter, MonthlyProjection,
    PeriodChart, PeriodSummary, RecurrenceNormalizer, ReminderGroups,
};
use crate::storage::LedgerSource;

const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardReport {
    pub preset: PeriodPreset,
    pub window: QueryWindow,
    pub summary: PeriodSummary,
    pub chart: PeriodChart,
    /// Latest one-off expenses and income in the window, newest first.
    pub recent_activity: Vec<Transaction>,
    pub projection: MonthlyProjection,
    pub reminders: ReminderGroups,
}

pub struct DashboardService;

impl DashboardService {
    pub fn summary(
        source: &dyn LedgerSource,
        preset: PeriodPreset,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> EngineResult<DashboardReport> {
        let normalizer = RecurrenceNormalizer::from_config(config);
        let window = preset.window(today);

        let ledger = build_ledger(source, &window, &LedgerFilter::all(), &normalizer)?;
        let summary = PeriodSummary::from_ledger(&ledger, &window, config);
        let chart = summary.chart(&config.chart_label_format);
        let recent_activity = ledger
            .iter()
            .filter(|txn| txn.source_type != SourceType::FixedOccurrence)
            .take(RECENT_ACTIVITY_LIMIT)
            .cloned()
            .collect();

        let obligations = source.fetch_fixed_obligations(true, today)?;
        let projection = project_current_month(&obligations, today, &normalizer)?;
        let reminders = group_reminders(
            &source.fetch_reminders()?,
            today,
            config.upcoming_horizon_days,
            &normalizer,
        )?;

        info!(
            preset = preset.key(),
            balance = %summary.balance,
            projected = %projection.total,
            "dashboard ready"
        );
        Ok(DashboardReport {
            preset,
            window,
            summary,
            chart,
            recent_activity,
            projection,
            reminders,
        })
    }

    /// Same as [`DashboardService::summary`] using the configured default period.
    pub fn default_summary(
        source: &dyn LedgerSource,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> EngineResult<DashboardReport> {
        Self::summary(source, config.default_period, today, config)
    }
}
