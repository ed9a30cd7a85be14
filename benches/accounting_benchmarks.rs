//! Performance benchmarks for the time and leave engine.
//!
//! Covers the hot calculation paths:
//! - Leave day counting over ranges from a few days to a full year
//! - Work hours computation for a day's clock pair
//! - Arrival classification
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hr_engine::calculation::{classify_arrival, compute_hours, count_leave_days};
use hr_engine::models::ShiftPolicy;
use uuid::Uuid;

fn weekend() -> HashSet<Weekday> {
    HashSet::from([Weekday::Sat, Weekday::Sun])
}

fn general_shift() -> ShiftPolicy {
    ShiftPolicy {
        id: Uuid::new_v4(),
        name: "general".to_string(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        grace_minutes: 15,
        half_day_minutes: 240,
        full_day_minutes: 480,
        is_night_shift: false,
        active: true,
    }
}

/// Benchmark: leave day counting with the sandwich rule for growing
/// range lengths.
fn bench_count_leave_days(c: &mut Criterion) {
    let from = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let overrides = HashMap::new();
    let offs = weekend();
    let holidays: BTreeSet<NaiveDate> = [
        NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
    ]
    .into_iter()
    .collect();

    let mut group = c.benchmark_group("count_leave_days");
    for days in [4i64, 30, 90, 365] {
        let to = from + Duration::days(days - 1);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &to, |b, &to| {
            b.iter(|| {
                black_box(count_leave_days(
                    black_box(from),
                    black_box(to),
                    &overrides,
                    &offs,
                    &holidays,
                    true,
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: hours computation for one clock pair.
fn bench_compute_hours(c: &mut Criterion) {
    let shift = general_shift();
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let first_in = date.and_hms_opt(9, 5, 0).unwrap();
    let last_out = date.and_hms_opt(18, 20, 0).unwrap();

    c.bench_function("compute_hours", |b| {
        b.iter(|| {
            black_box(compute_hours(
                black_box(first_in),
                black_box(last_out),
                Some(&shift),
            ))
        })
    });
}

/// Benchmark: arrival classification.
fn bench_classify_arrival(c: &mut Criterion) {
    let shift = general_shift();
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let clock_in = date.and_hms_opt(9, 25, 0).unwrap();

    c.bench_function("classify_arrival", |b| {
        b.iter(|| black_box(classify_arrival(black_box(clock_in), Some(&shift))))
    });
}

criterion_group!(
    benches,
    bench_count_leave_days,
    bench_compute_hours,
    bench_classify_arrival
);
criterion_main!(benches);
