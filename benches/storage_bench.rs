//! Benchmarks for the standalone storage backend and raw command layer.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use stratakv::{
    CommandService, Modify, RawGetRequest, RawScanRequest, RedbEngine, RequestContext,
    StandaloneStorage, Storage,
};

fn in_memory_storage() -> StandaloneStorage<RedbEngine> {
    StandaloneStorage::new(RedbEngine::in_memory().unwrap())
}

fn populated_service(keys: u64) -> CommandService<StandaloneStorage<RedbEngine>> {
    let storage = in_memory_storage();
    let ctx = RequestContext::new();
    let batch: Vec<_> = (0..keys)
        .map(|i| Modify::Put {
            cf: "bench".to_string(),
            key: format!("key:{i:06}").into_bytes(),
            value: format!("value:{i:06}").into_bytes(),
        })
        .collect();
    storage.write(&ctx, batch).unwrap();
    CommandService::new(storage)
}

/// Benchmark single-element write batches.
fn bench_write_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_single");
    group.throughput(Throughput::Elements(1));

    group.bench_function("write_single", |b| {
        b.iter_batched(
            in_memory_storage,
            |storage| {
                let ctx = RequestContext::new();
                storage
                    .write(
                        &ctx,
                        vec![Modify::Put {
                            cf: "bench".to_string(),
                            key: b"key".to_vec(),
                            value: b"value".to_vec(),
                        }],
                    )
                    .unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark multi-element write batches.
fn bench_write_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_batch");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_function(format!("write_batch_{size}"), |b| {
            b.iter_batched(
                in_memory_storage,
                |storage| {
                    let ctx = RequestContext::new();
                    let batch: Vec<_> = (0..size)
                        .map(|i| Modify::Put {
                            cf: "bench".to_string(),
                            key: format!("key:{i:06}").into_bytes(),
                            value: format!("value:{i:06}").into_bytes(),
                        })
                        .collect();
                    storage.write(&ctx, batch).unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark point lookups through the command layer.
fn bench_raw_get(c: &mut Criterion) {
    const NUM_KEYS: u64 = 10000;
    let mut group = c.benchmark_group("raw_get");
    group.throughput(Throughput::Elements(100));

    group.bench_function("raw_get_100", |b| {
        b.iter_batched(
            || populated_service(NUM_KEYS),
            |service| {
                for i in (0..100).map(|x| x * 97 % NUM_KEYS) {
                    let resp = service
                        .raw_get(RawGetRequest {
                            cf: "bench".to_string(),
                            key: format!("key:{i:06}").into_bytes(),
                            ..Default::default()
                        })
                        .unwrap();
                    let _ = black_box(resp.value);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark range scans through the command layer.
fn bench_raw_scan(c: &mut Criterion) {
    const NUM_KEYS: u64 = 10000;
    let mut group = c.benchmark_group("raw_scan");

    for limit in [10u32, 100, 1000] {
        group.throughput(Throughput::Elements(u64::from(limit)));
        group.bench_function(format!("raw_scan_{limit}"), |b| {
            b.iter_batched(
                || populated_service(NUM_KEYS),
                |service| {
                    let resp = service
                        .raw_scan(RawScanRequest {
                            cf: "bench".to_string(),
                            start_key: b"key:".to_vec(),
                            limit,
                            ..Default::default()
                        })
                        .unwrap();
                    black_box(resp.pairs.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write_single, bench_write_batch, bench_raw_get, bench_raw_scan);
criterion_main!(benches);
