//! Benchmarks pour le parsing XYZ

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn synthetic_survey(n: usize) -> String {
    let mut text = String::with_capacity(n * 32);
    for i in 0..n {
        text.push_str(&format!(
            "{:.2} {:.2} {:.3}\n",
            440000.0 + i as f64 * 0.5,
            4431000.0 + i as f64 * 0.25,
            120.0 + (i % 50) as f64 * 0.1
        ));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1_000usize, 100_000] {
        let text = synthetic_survey(size);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let result = xyz::parse(black_box(text));
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
