//! Performance benchmarks for the Duty Hours Engine.
//!
//! This benchmark suite covers:
//! - Hour classification of a single shift
//! - Aggregating one member-month with a busy duty roster
//! - Generating reports for a batch of members on the blocking pool
//! - Scaling with the number of calendar events
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use duty_hours_engine::calculation::{DutyAggregator, HourClassifier};
use duty_hours_engine::config::ConfigLoader;
use duty_hours_engine::models::{CalendarEvent, ClockTime, ManualDutyEntry, Member, YearMonth};
use duty_hours_engine::runner::{ReportJob, ReportRunner};

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/duty2025").expect("Failed to load config")
}

fn june() -> YearMonth {
    YearMonth::parse("202506").expect("valid period")
}

/// `count` all-day duty events cycling through the days of June.
fn create_events(count: usize) -> Vec<CalendarEvent> {
    (0..count)
        .map(|i| CalendarEvent::all_day("On call", format!("2025-06-{:02}", (i % 30) + 1)))
        .collect()
}

/// Manual entries for one person, a mix of short and overnight records.
fn create_entries(person: &str, count: usize) -> Vec<ManualDutyEntry> {
    (0..count)
        .map(|i| {
            let day = (i % 30) + 1;
            let (hour, hours) = if i % 2 == 0 { (14, 1.5) } else { (23, 3.0) };
            ManualDutyEntry::new(person, format!("202506{:02}{:02}00", day, hour), hours, "bench")
        })
        .collect()
}

/// Benchmark: Classify a single shift.
fn bench_classify_shift(c: &mut Criterion) {
    let classifier = HourClassifier::default();
    let start = ClockTime::parse_start("1600").expect("valid time");

    c.bench_function("classify_shift", |b| {
        b.iter(|| black_box(classifier.classify(black_box(start), ClockTime::END_OF_DAY, false)))
    });
}

/// Benchmark: One member-month with a duty every other day and 20 manual entries.
fn bench_member_month(c: &mut Criterion) {
    let config = load_config();
    let member = config.member("A").expect("fixture member").clone();
    let events = create_events(15);
    let entries = create_entries(&member.name, 20);
    let aggregator = DutyAggregator::new(config.calendar(), config.settings());

    c.bench_function("member_month", |b| {
        b.iter(|| black_box(aggregator.build_report(&member, june(), &events, &entries)))
    });
}

/// Benchmark: Batch of 100 member-months on the blocking pool.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let (runner, _) = ReportRunner::from_config(load_config());

    let members: Vec<Member> = (0..100)
        .map(|i| {
            Member::new(format!("M{:03}", i), format!("Member {:03}", i))
                .with_calendar(format!("m{:03}@cal", i))
        })
        .collect();
    let entries: Arc<Vec<ManualDutyEntry>> = Arc::new(
        members
            .iter()
            .flat_map(|m| create_entries(&m.name, 10))
            .collect(),
    );
    let mut events_by_member: HashMap<String, Vec<CalendarEvent>> = members
        .iter()
        .map(|m| (m.id.clone(), create_events(10)))
        .collect();

    let jobs: Vec<ReportJob> = members
        .iter()
        .map(|m| ReportJob {
            member: m.clone(),
            period: june(),
            events: events_by_member.remove(&m.id).unwrap_or_default(),
            entries: Arc::clone(&entries),
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));
    group.sample_size(20);

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let reports = runner.generate(jobs.clone()).await.expect("reports");
            black_box(reports)
        })
    });

    group.finish();
}

/// Benchmark: Various event counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let config = load_config();
    let member = config.member("A").expect("fixture member").clone();
    let aggregator = DutyAggregator::new(config.calendar(), config.settings());

    let mut group = c.benchmark_group("scaling");

    for event_count in [1, 5, 10, 30, 60].iter() {
        let events = create_events(*event_count);

        group.throughput(Throughput::Elements(*event_count as u64));
        group.bench_with_input(
            BenchmarkId::new("events", event_count),
            event_count,
            |b, _| b.iter(|| black_box(aggregator.aggregate(&member.name, june(), &events, &[]))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify_shift,
    bench_member_month,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
