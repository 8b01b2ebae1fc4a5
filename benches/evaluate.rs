use chrono::DateTime;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use period_lite::{Period, Schedule};
use std::collections::HashMap;

const WEEKDAY_RULES: &[&str] = &["mon-fri", "mon#1,friL", "0-6/2", "sat,sun"];
const MONTH_DAY_RULES: &[&str] = &["1-15/2,L", "15W", "1,10,20,28"];
const MONTH_RULES: &[&str] = &["jan-jun/2,dec", "1,3,5-9"];

const NOW: &[&str] = &[
    "2024-01-10T10:00:00Z",
    "2024-06-15T22:30:00Z",
    "2024-12-31T23:59:59Z",
];

fn catalog() -> (Schedule, HashMap<String, Period>) {
    let periods = HashMap::from([
        (
            "office-hours".to_string(),
            Period::new()
                .with_weekdays("mon-fri")
                .unwrap()
                .with_begin_time("08:00")
                .unwrap()
                .with_end_time("18:00")
                .unwrap(),
        ),
        (
            "month-edges".to_string(),
            Period::new().with_month_days("1,15W,L").unwrap(),
        ),
        (
            "odd-months-nights".to_string(),
            Period::new()
                .with_months("1/2")
                .unwrap()
                .with_begin_time("22:00")
                .unwrap()
                .with_end_time("06:00")
                .unwrap(),
        ),
    ]);
    let schedule = Schedule::new("bench")
        .with_timezone("Europe/Kyiv")
        .unwrap()
        .with_periods(["office-hours", "month-edges", "odd-months-nights"]);

    (schedule, periods)
}

pub fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rule in WEEKDAY_RULES {
        group.bench_with_input(BenchmarkId::from_parameter(format!("weekdays/{rule}")), rule, |b, rule| {
            b.iter(|| Period::new().with_weekdays(*rule).unwrap())
        });
    }
    for rule in MONTH_DAY_RULES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("month-days/{rule}")),
            rule,
            |b, rule| b.iter(|| Period::new().with_month_days(*rule).unwrap()),
        );
    }
    for rule in MONTH_RULES {
        group.bench_with_input(BenchmarkId::from_parameter(format!("months/{rule}")), rule, |b, rule| {
            b.iter(|| Period::new().with_months(*rule).unwrap())
        });
    }

    group.finish();
}

pub fn is_active_benchmark(c: &mut Criterion) {
    let (schedule, periods) = catalog();
    let mut group = c.benchmark_group("is_active");

    for now in NOW {
        let instant = DateTime::parse_from_rfc3339(now).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(now), &instant, |b, instant| {
            b.iter(|| schedule.is_active(&periods, instant))
        });
    }

    group.finish();
}

pub fn boundary_times_benchmark(c: &mut Criterion) {
    let (schedule, periods) = catalog();
    let mut group = c.benchmark_group("boundary_times");

    for now in NOW {
        let instant = DateTime::parse_from_rfc3339(now).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(now), &instant, |b, instant| {
            b.iter(|| schedule.boundary_times(&periods, instant))
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmark, is_active_benchmark, boundary_times_benchmark);
criterion_main!(benches);
