use criterion::{criterion_group, criterion_main, Criterion};
use octofit_tracker::list_field::normalize;
use serde_json::{json, Value};
use std::hint::black_box;

fn benchmark_normalize(c: &mut Criterion) {
    let members: Vec<String> = (0..50).map(|i| format!("hero number {}", i)).collect();
    let native = json!(members);
    let python_repr = Value::String(format!(
        "[{}]",
        members
            .iter()
            .map(|m| format!("'{}'", m))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    let malformed = Value::String(format!("[{}", "'x', ".repeat(50)));

    let mut group = c.benchmark_group("normalize_members");

    group.bench_function("native_list", |b| b.iter(|| normalize(black_box(&native))));

    group.bench_function("python_repr_text", |b| {
        b.iter(|| normalize(black_box(&python_repr)))
    });

    group.bench_function("malformed_text", |b| {
        b.iter(|| normalize(black_box(&malformed)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
