//! Parse and render throughput over generated corpora

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bibraw::{fixtures, parse, to_string};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for n in [10, 100, 1_000] {
        let input = fixtures::generate_bib(n);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| parse(black_box(input)).unwrap());
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for n in [10, 100, 1_000] {
        let input = fixtures::generate_bib(n);
        let doc = parse(&input).unwrap();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
