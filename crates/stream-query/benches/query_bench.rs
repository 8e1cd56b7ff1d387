use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use stream_query::{
    DecodePolicy, EventKind, EventScanner, EventSource, InMemoryEventSource, ScanOptions,
    collect_stats, event_at_index, random_event,
};

fn make_source(records: usize) -> InMemoryEventSource {
    let records: Vec<Vec<u8>> = (0..records)
        .map(|i| {
            let kind = if i % 3 == 0 {
                "passenger_checkin"
            } else {
                "flight_schedule"
            };
            serde_json::to_vec(&serde_json::json!({
                "type": kind,
                "payload": {"seq": i, "flight": format!("AC{i:04}")}
            }))
            .unwrap()
        })
        .collect();
    InMemoryEventSource::from_records(records)
}

fn scanner(source: &InMemoryEventSource) -> EventScanner<stream_query::InMemoryCursor> {
    let options = ScanOptions {
        idle_timeout: Duration::from_millis(10),
        decode_policy: DecodePolicy::Abort,
    };
    EventScanner::new(source.open().unwrap(), options)
}

fn bench_event_at_index(c: &mut Criterion) {
    let source = make_source(1000);

    c.bench_function("query/index_first_of_1000", |b| {
        b.iter(|| {
            event_at_index(scanner(&source), EventKind::FlightSchedule, 0)
                .unwrap()
                .unwrap();
        });
    });

    c.bench_function("query/index_last_of_1000", |b| {
        b.iter(|| {
            event_at_index(scanner(&source), EventKind::PassengerCheckin, 333)
                .unwrap()
                .unwrap();
        });
    });
}

fn bench_random_event(c: &mut Criterion) {
    let source = make_source(1000);

    c.bench_function("query/random_of_1000", |b| {
        b.iter(|| {
            random_event(scanner(&source), EventKind::FlightSchedule)
                .unwrap()
                .unwrap();
        });
    });
}

fn bench_collect_stats(c: &mut Criterion) {
    let source = make_source(1000);

    c.bench_function("query/stats_of_1000", |b| {
        b.iter(|| {
            collect_stats(scanner(&source)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_event_at_index,
    bench_random_event,
    bench_collect_stats,
);
criterion_main!(benches);
