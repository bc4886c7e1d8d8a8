use cashflow_core::domain::{AdHocRecord, FixedObligation, QueryWindow};
use cashflow_core::ledger::{aggregate, build_ledger, paginate, LedgerFilter, RecurrenceNormalizer};
use cashflow_core::storage::{load_snapshot_from_path, save_snapshot_to_path, InMemorySource};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;

const LABELS: [&str; 5] = ["mensal", "bimestral", "trimestral", "semestral", "anual"];

fn build_sample_source(record_count: usize, obligation_count: usize) -> InMemorySource {
    let start_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut source = InMemorySource::default();

    for idx in 0..record_count {
        let date = start_date + Duration::days((idx % 1826) as i64);
        let amount = Decimal::new(500 + (idx % 10_000) as i64, 2);
        let record = if idx % 10 == 0 {
            AdHocRecord::income(idx as i64, date, "Payment", amount * Decimal::from(20))
        } else {
            AdHocRecord::expense(idx as i64, date, "Purchase", amount)
                .with_category(format!("Category {}", idx % 12))
        };
        source = source.with_record(record);
    }

    for idx in 0..obligation_count {
        let obligation = FixedObligation::new(
            (record_count + idx) as i64,
            "Bill",
            Decimal::new(2_500 + idx as i64, 2),
            start_date + Duration::days((idx % 365) as i64),
            LABELS[idx % LABELS.len()],
        )
        .with_category(format!("Fixed {}", idx % 6));
        source = source.with_obligation(obligation);
    }
    source
}

fn five_years() -> QueryWindow {
    QueryWindow::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
    .unwrap()
}

fn bench_ledger_build(c: &mut Criterion) {
    let source = build_sample_source(black_box(10_000), black_box(500));
    let window = five_years();
    let normalizer = RecurrenceNormalizer::new();

    c.bench_function("build_ledger_10k_records_500_obligations", |b| {
        b.iter(|| {
            let ledger = build_ledger(&source, &window, &LedgerFilter::all(), &normalizer)
                .expect("build ledger");
            black_box(ledger);
        })
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let source = build_sample_source(black_box(10_000), black_box(500));
    let window = five_years();
    let ledger = build_ledger(
        &source,
        &window,
        &LedgerFilter::all(),
        &RecurrenceNormalizer::new(),
    )
    .expect("seed ledger");

    c.bench_function("aggregate_five_years", |b| {
        b.iter(|| black_box(aggregate(&ledger, &window)))
    });

    c.bench_function("paginate_last_page", |b| {
        b.iter(|| black_box(paginate(&ledger, usize::MAX, 30)))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let source = build_sample_source(black_box(10_000), black_box(500));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.json");
    save_snapshot_to_path(source.snapshot(), &file_path).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = load_snapshot_from_path(&file_path).expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_ledger_build, bench_aggregation, bench_snapshot_io);
criterion_main!(benches);
