//! Benchmarks for list filtering.
//!
//! A filter pass runs on every keystroke in the search box.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use http_replay::filter::{apply, Category, FilterState};
use http_replay::models::CapturedEntry;

fn generate_entries(count: usize) -> Vec<CapturedEntry> {
    (0..count)
        .map(|i| {
            let method = match i % 4 {
                0 => "GET",
                1 => "POST",
                2 => "PUT",
                _ => "DELETE",
            };
            let mut entry = CapturedEntry::new(
                method,
                format!("https://api.example.com/v1/resource/{}?page={}", i, i % 7),
            )
            .with_header("Accept", "application/json")
            .with_header("Authorization", format!("Bearer token-{}", i))
            .with_header("X-Request-ID", format!("req-{:08}", i));
            if method != "GET" {
                entry = entry.with_body(format!(r#"{{"id":{},"name":"Item {}"}}"#, i, i));
            }
            entry
        })
        .collect()
}

fn state(term: &str, use_regex: bool, category: Category) -> FilterState {
    FilterState {
        search_term: term.to_string(),
        use_regex,
        category,
    }
}

fn bench_plain_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_search");

    for size in [100, 1000, 10000].iter() {
        let entries = generate_entries(*size);
        let filter = state("item 42", false, Category::All);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| apply(black_box(&entries), black_box(&filter)))
        });
    }

    group.finish();
}

fn bench_regex_search(c: &mut Criterion) {
    let entries = generate_entries(1000);
    let filter = state(r"resource/\d{3}\?page=[0-3]", true, Category::All);

    c.bench_function("regex_search_1000", |b| {
        b.iter(|| apply(black_box(&entries), black_box(&filter)))
    });
}

fn bench_category_only(c: &mut Criterion) {
    let entries = generate_entries(1000);
    let filter = state("", false, Category::Method("POST".to_string()));

    c.bench_function("category_only_1000", |b| {
        b.iter(|| apply(black_box(&entries), black_box(&filter)))
    });
}

criterion_group!(
    benches,
    bench_plain_search,
    bench_regex_search,
    bench_category_only
);
criterion_main!(benches);
