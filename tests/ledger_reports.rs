mod common;

use cashflow_core::config::EngineConfig;
use cashflow_core::core::{DashboardService, ReportRequest, ReportService};
use cashflow_core::domain::{PeriodPreset, QueryWindow, SourceType};
use cashflow_core::ledger::{
    aggregate, average_per_elapsed_day, build_ledger, paginate, LedgerFilter, LedgerOrder,
    RecurrenceNormalizer,
};
use common::{config_manager, day, json_source, sample_snapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn march() -> QueryWindow {
    QueryWindow::new(day(2024, 3, 1), day(2024, 3, 31)).unwrap()
}

fn expenses_only() -> LedgerFilter {
    LedgerFilter::all().with_sources([SourceType::VariableExpense, SourceType::FixedOccurrence])
}

#[test]
fn expense_statistics_for_a_month() {
    let source = json_source(&sample_snapshot());
    let ledger = build_ledger(
        &source,
        &march(),
        &expenses_only(),
        &RecurrenceNormalizer::new(),
    )
    .unwrap();
    let stats = aggregate(&ledger, &march());

    assert_eq!(stats.record_count, 6);
    assert_eq!(stats.total, dec!(2006.49));
    assert_eq!(stats.daily_series.len(), 31);
    assert_eq!(stats.daily_series.values().copied().sum::<Decimal>(), stats.total);
    assert_eq!(stats.daily_series[&day(2024, 3, 31)], dec!(1500));
    assert_eq!(stats.category_totals["Transport"], dec!(345));
    assert_eq!(stats.category_totals["Food"], dec!(148.50));
    assert_eq!(stats.top_category.as_deref(), Some("Housing"));
    assert_eq!(
        stats.average_per_elapsed_day,
        average_per_elapsed_day(stats.total, &march())
    );
    assert_ne!(stats.average_per_elapsed_day, stats.average_per_record);
}

#[test]
fn ledger_is_sorted_newest_first_with_id_tie_break() {
    let source = json_source(&sample_snapshot());
    let ledger = build_ledger(
        &source,
        &march(),
        &LedgerFilter::all(),
        &RecurrenceNormalizer::new(),
    )
    .unwrap();
    assert_eq!(ledger.len(), 7);
    assert_eq!(ledger[0].id, 10);
    assert_eq!(ledger[0].source_type, SourceType::FixedOccurrence);
    assert!(ledger.windows(2).all(|pair| pair[0].date >= pair[1].date));
    assert_eq!(ledger.last().map(|row| row.id), Some(1));
}

#[test]
fn category_filter_applies_to_every_source() {
    let source = json_source(&sample_snapshot());
    let filter = expenses_only()
        .with_category("Transport")
        .with_order(LedgerOrder::DateAsc);
    let ledger = build_ledger(&source, &march(), &filter, &RecurrenceNormalizer::new()).unwrap();
    let ids: Vec<_> = ledger.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![3, 12]);
}

#[test]
fn pages_reconstruct_the_ledger() {
    let source = json_source(&sample_snapshot());
    let wide = QueryWindow::new(day(2023, 1, 1), day(2024, 12, 31)).unwrap();
    let ledger = build_ledger(
        &source,
        &wide,
        &LedgerFilter::all(),
        &RecurrenceNormalizer::new(),
    )
    .unwrap();
    assert!(ledger.len() > 30);

    for size in [1, 5, 30, 1000] {
        let first = paginate(&ledger, 1, size);
        let joined: Vec<_> = (1..=first.total_pages)
            .flat_map(|page| paginate(&ledger, page, size).items)
            .collect();
        assert_eq!(joined, ledger, "page size {size}");
    }
}

#[test]
fn window_report_uses_saved_config() {
    let manager = config_manager();
    let config = EngineConfig {
        page_size: 2,
        chart_label_format: "%m-%d".into(),
        ..EngineConfig::default()
    };
    manager.save(&config).unwrap();
    let loaded = manager.load().unwrap();

    let source = json_source(&sample_snapshot());
    let request = ReportRequest::new(march())
        .with_filter(expenses_only())
        .with_page(2);
    let report = ReportService::window_report(&source, &request, &loaded).unwrap();

    assert_eq!(report.page.total_pages, 3);
    assert_eq!(report.page.current_page, 2);
    assert_eq!(report.page.items.len(), 2);
    assert_eq!(report.chart.labels[0], "03-01");
    assert_eq!(report.statistics.total, dec!(2006.49));
}

#[test]
fn dashboard_combines_summary_projection_and_reminders() {
    let source = json_source(&sample_snapshot());
    let today = day(2024, 3, 18);
    let report = DashboardService::summary(
        &source,
        PeriodPreset::from_key("mes_atual"),
        today,
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(report.window.start(), day(2024, 3, 1));
    assert_eq!(report.summary.income.total, dec!(4200));
    assert_eq!(report.summary.variable_expenses.total, dec!(193.50));
    assert_eq!(report.summary.fixed_expenses.total, dec!(12.99));
    assert_eq!(report.summary.balance, dec!(3993.51));
    assert_eq!(report.summary.savings_allowance, dec!(98));

    let projected: Vec<_> = report
        .projection
        .items
        .iter()
        .map(|item| (item.obligation_id, item.due_date))
        .collect();
    assert_eq!(projected, vec![(12, day(2024, 3, 20)), (10, day(2024, 3, 31))]);
    assert_eq!(report.projection.total, dec!(1800));

    assert_eq!(report.reminders.overdue[0].reminder.id, 20);
    assert_eq!(report.reminders.upcoming[0].display_date, day(2024, 3, 25));
}
