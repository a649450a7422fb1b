//! Performance benchmarks for the shift rotation scheduler.
//!
//! Covers the pure scheduling path (single date, month planning, long date
//! ranges) and the overtime statement over the in-memory store, both cold
//! and once the month's records exist.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use shift_rota::config::ConfigLoader;
use shift_rota::overtime::{InMemoryOvertimeStore, OvertimeEngine};
use shift_rota::scheduler::Scheduler;

/// Creates a scheduler over the bundled configuration.
fn create_scheduler() -> Scheduler {
    let config = ConfigLoader::load("./config/noc").expect("Failed to load config");
    Scheduler::new(config.into_config())
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn bench_single_date(c: &mut Criterion) {
    let scheduler = create_scheduler();

    c.bench_function("resolve_responsibilities", |b| {
        b.iter(|| {
            scheduler
                .resolve_responsibilities(black_box("A"), black_box(start_date()))
                .unwrap()
        })
    });
}

fn bench_plan_month(c: &mut Criterion) {
    let scheduler = create_scheduler();

    let mut group = c.benchmark_group("planning");
    group.throughput(Throughput::Elements(31));
    group.bench_function("plan_month", |b| {
        b.iter(|| scheduler.plan_month(black_box(3), black_box(2026)).unwrap())
    });
    group.finish();
}

fn bench_date_range_scaling(c: &mut Criterion) {
    let scheduler = create_scheduler();

    let mut group = c.benchmark_group("rest_rotation_scaling");
    for days in [30i64, 365, 3650].iter() {
        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), days, |b, &days| {
            b.iter(|| {
                (0..days)
                    .filter_map(|offset| {
                        scheduler
                            .resolve_rest_assignment("A", start_date() + Duration::days(offset))
                            .ok()
                            .and_then(|rest| rest.resting)
                    })
                    .count()
            })
        });
    }
    group.finish();
}

fn bench_overtime_month(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let scheduler = create_scheduler();

    let mut group = c.benchmark_group("overtime");

    group.bench_function("cold_month", |b| {
        b.to_async(&rt).iter(|| async {
            let engine =
                OvertimeEngine::new(scheduler.clone(), Arc::new(InMemoryOvertimeStore::new()));
            engine
                .get_or_create_overtime_for_month(black_box("alaine"), 3, 2026)
                .await
                .unwrap()
        })
    });

    let warm = OvertimeEngine::new(scheduler.clone(), Arc::new(InMemoryOvertimeStore::new()));
    rt.block_on(warm.get_or_create_overtime_for_month("alaine", 3, 2026))
        .unwrap();

    group.bench_function("warm_month", |b| {
        b.to_async(&rt).iter(|| async {
            warm.get_or_create_overtime_for_month(black_box("alaine"), 3, 2026)
                .await
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_date,
    bench_plan_month,
    bench_date_range_scaling,
    bench_overtime_month,
);
criterion_main!(benches);
