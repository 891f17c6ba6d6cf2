#![allow(unused)]
extern crate bytepat;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use bytepat::prelude::*;
use bytepat::section::{io, shift};
use std::hint::black_box;
use tempfile::NamedTempFile;

const SECTION_SIZE: usize = 1024 * 1024;

fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Benchmark bulk reads through the Section trait for the memory and file
/// backings.
fn bench_section_reads(c: &mut Criterion) {
    let mut memory = MemorySection::new("bench", ramp(SECTION_SIZE));

    let temp = NamedTempFile::new().expect("temp file");
    std::fs::write(temp.path(), ramp(SECTION_SIZE)).expect("seed file");
    let mut file = FileSection::open("bench", temp.path()).expect("open file section");

    let mut group = c.benchmark_group("section_read");
    group.throughput(Throughput::Bytes(SECTION_SIZE as u64));
    group.bench_function("memory_1mib", |b| {
        let mut buffer = vec![0u8; SECTION_SIZE];
        b.iter(|| {
            memory
                .read_data(0, black_box(&mut buffer), SECTION_SIZE as u64)
                .unwrap();
            black_box(&buffer);
        });
    });
    group.bench_function("file_1mib", |b| {
        let mut buffer = vec![0u8; SECTION_SIZE];
        b.iter(|| {
            file.read_data(0, black_box(&mut buffer), SECTION_SIZE as u64)
                .unwrap();
            black_box(&buffer);
        });
    });
    group.finish();
}

/// Benchmark bulk writes with a skipped source, the plain "store these bytes"
/// path.
fn bench_section_writes(c: &mut Criterion) {
    let mut memory = MemorySection::with_size("bench", SECTION_SIZE);

    let mut group = c.benchmark_group("section_write");
    group.throughput(Throughput::Bytes(SECTION_SIZE as u64));
    group.bench_function("memory_1mib", |b| {
        let mut payload = ramp(SECTION_SIZE);
        b.iter(|| {
            memory
                .write_data(SKIP, 0, black_box(&mut payload), SECTION_SIZE as u64)
                .unwrap();
        });
    });
    group.finish();
}

/// Benchmark overlapping region moves, which run through the chunked staging
/// loop.
fn bench_region_moves(c: &mut Criterion) {
    let len = (SECTION_SIZE / 2) as u64;
    let mut memory = MemorySection::new("bench", ramp(SECTION_SIZE));

    let mut group = c.benchmark_group("region_move");
    group.throughput(Throughput::Bytes(len));
    group.bench_function("overlapping_512kib", |b| {
        b.iter(|| {
            shift::copy_within(&mut memory, 0, 17, black_box(len)).unwrap();
        });
    });
    group.finish();
}

/// Benchmark scalar decoding over a raw buffer.
fn bench_scalar_decode(c: &mut Criterion) {
    let data = ramp(64 * 1024);

    let mut group = c.benchmark_group("scalar_decode");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("read_le_u32", |b| {
        b.iter(|| {
            let mut offset = 0;
            let mut sum = 0u64;
            while offset < data.len() {
                sum = sum.wrapping_add(u64::from(
                    io::read_le_at::<u32>(black_box(&data), &mut offset).unwrap(),
                ));
            }
            black_box(sum)
        });
    });
    group.finish();
}

/// Benchmark the invocation path, from qualified-name resolution through the
/// arity check to the callback.
fn bench_function_calls(c: &mut Criterion) {
    let registry = FunctionRegistry::new();
    registry.register(
        &NamespacePath::new(["bench"]),
        "add",
        Function::new(ParameterCount::exactly(2), |_ctx, args| {
            Ok(Some(Literal::Unsigned(
                args[0].as_u128()? + args[1].as_u128()?,
            )))
        }),
    );
    let function = registry.get("bench::add").expect("registered");
    let mut ctx = EvalContext::new();
    let args = [Literal::Unsigned(40), Literal::Unsigned(2)];
    let wrapped = [
        Argument::Value(Literal::Unsigned(40)),
        Argument::Value(Literal::Unsigned(2)),
    ];

    let mut group = c.benchmark_group("function_call");
    group.throughput(Throughput::Elements(1));
    group.bench_function("invoke_direct", |b| {
        b.iter(|| function.invoke(&mut ctx, black_box(&args)).unwrap());
    });
    group.bench_function("registry_call", |b| {
        b.iter(|| {
            registry
                .call(&mut ctx, black_box("bench::add"), black_box(&wrapped))
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_section_reads,
    bench_section_writes,
    bench_region_moves,
    bench_scalar_decode,
    bench_function_calls
);
criterion_main!(benches);
