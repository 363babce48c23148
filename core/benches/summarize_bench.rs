use criterion::{criterion_group, criterion_main, Criterion};
use precis::extractive_summarize;

fn sample_text() -> String {
    let topics = ["storage", "network", "parser", "scheduler", "cache", "compiler"];
    (0..400)
        .map(|i| {
            let a = topics[i % topics.len()];
            let b = topics[(i * 7 + 3) % topics.len()];
            format!("The {a} layer talks to the {b} layer over a narrow interface number {i}.")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_extractive(c: &mut Criterion) {
    let text = sample_text();
    c.bench_function("extractive_400_sentences", |b| b.iter(|| extractive_summarize(&text, 5)));
}

criterion_group!(benches, bench_extractive);
criterion_main!(benches);
