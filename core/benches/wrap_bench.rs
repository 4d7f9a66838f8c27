use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use filehash::stream::{unwrap_stream, verify_stream, wrap_stream};
use filehash::WrapOptions;
use tempfile::tempdir;

const PAYLOAD: usize = 4 * 1024 * 1024;

fn payload() -> Vec<u8> {
    (0..PAYLOAD).map(|i| (i % 251) as u8).collect()
}

fn wrap_memory(c: &mut Criterion) {
    let data = payload();
    let mut group = c.benchmark_group("wrap");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));
    group.bench_function("wrap_memory_4mib", |b| {
        b.iter_batched(
            || Vec::with_capacity(PAYLOAD + 36),
            |mut out| {
                wrap_stream(&mut Cursor::new(&data), Cursor::new(&mut out), &WrapOptions::default())
                    .unwrap();
                out
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn wrap_file_sync(c: &mut Criterion) {
    let data = payload();
    let mut group = c.benchmark_group("wrap");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));
    group.bench_function("wrap_file_4mib", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let f = std::fs::File::create(dir.path().join("bench.fh")).unwrap();
                (dir, f)
            },
            |(_dir, f)| {
                wrap_stream(&mut Cursor::new(&data), f, &WrapOptions::default()).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn unwrap_and_verify(c: &mut Criterion) {
    let data = payload();
    let mut wrapped = Vec::new();
    wrap_stream(&mut Cursor::new(&data), Cursor::new(&mut wrapped), &WrapOptions::default()).unwrap();

    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Bytes(PAYLOAD as u64));
    group.bench_function("unwrap_memory_4mib", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(PAYLOAD);
            unwrap_stream(Cursor::new(&wrapped), &mut out, &WrapOptions::default()).unwrap();
            out
        });
    });
    group.bench_function("verify_memory_4mib", |b| {
        b.iter(|| verify_stream(Cursor::new(&wrapped), &WrapOptions::default()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, wrap_memory, wrap_file_sync, unwrap_and_verify);
criterion_main!(benches);
