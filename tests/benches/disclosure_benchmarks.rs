//! # Timelock-Vault Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | `check_due` | Cost follows due entries, not store size |
//! | `add_entry` | O(log n) index insert |
//! | gate pull | O(1) lookup plus one Keccak-256 digest |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::RngCore;
use shared_bus::InMemoryEventBus;
use shared_crypto::keccak256;
use std::sync::Arc;
use std::time::Duration;
use tv_01_disclosure::{
    DisclosureApi, DisclosureConfig, DisclosureService, ManualTimeSource, NewEntry,
};

const T0: u64 = 1_700_000_000;
const DAY: u64 = 86_400;

type BenchService = DisclosureService<Arc<ManualTimeSource>, Arc<InMemoryEventBus>>;

fn service() -> (BenchService, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(T0));
    let service = DisclosureService::new(
        DisclosureConfig::default(),
        Arc::clone(&clock),
        // No subscribers: disclosed events are dropped rather than retained
        Arc::new(InMemoryEventBus::new()),
    );
    (service, clock)
}

fn entry(i: u64, release_time: u64) -> NewEntry {
    let mut payload = vec![0u8; 256];
    rand::thread_rng().fill_bytes(&mut payload);
    let hash = keccak256(&payload);
    NewEntry::new(payload, b"key".to_vec(), "Alice", format!("data-{i}"), release_time, hash)
}

/// Stores of growing size where only 16 entries are ever due.
fn bench_check_due(c: &mut Criterion) {
    let mut group = c.benchmark_group("tv-01-check-due");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000u64, 10_000, 100_000] {
        let (service, _) = service();
        for i in 0..size {
            // First 16 release tomorrow, the rest in a year
            let release = if i < 16 { T0 + DAY } else { T0 + 365 * DAY };
            service.add_entry(entry(i, release)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("sparse_due", size), &size, |b, _| {
            b.iter(|| black_box(service.check_due(T0 + DAY)))
        });
    }
    group.finish();
}

fn bench_add_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("tv-01-add-entry");
    group.throughput(Throughput::Elements(1_000));

    group.bench_function("add_1000", |b| {
        b.iter_batched(
            || (0..1_000).map(|i| entry(i, T0 + DAY + i)).collect::<Vec<_>>(),
            |entries| {
                let (service, _) = service();
                for e in entries {
                    black_box(service.add_entry(e).unwrap());
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tv-01-gate");
    let (service, clock) = service();
    service.add_entry(entry(0, T0 + DAY)).unwrap();
    clock.set(T0 + DAY);

    group.bench_function("send_payload_verified", |b| {
        b.iter(|| black_box(service.send_payload(0).unwrap()))
    });
    group.bench_function("send_decryption_key_verified", |b| {
        b.iter(|| black_box(service.send_decryption_key(0).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_check_due, bench_add_entry, bench_gate);
criterion_main!(benches);
