//! Benchmarks for raw request encoding and decoding.
//!
//! Decoding runs on every send and encoding on every selection, so both
//! should stay well below a frame even for large bodies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use http_replay::codec::{decode, encode};
use http_replay::models::CapturedEntry;

/// Builds a capture with `num_headers` headers and a JSON body of
/// `num_items` objects.
fn generate_entry(num_headers: usize, num_items: usize) -> CapturedEntry {
    let mut entry = CapturedEntry::new("POST", "https://api.example.com/v1/resources?expand=all");
    for i in 0..num_headers {
        entry = entry.with_header(format!("X-Custom-{}", i), format!("value-{}", i));
    }

    let items: Vec<String> = (0..num_items)
        .map(|i| {
            format!(
                r#"{{"id":{},"name":"Resource {}","tags":["a","b"],"meta":{{"version":{}}}}}"#,
                i, i, i
            )
        })
        .collect();
    entry.with_body(format!("[{}]", items.join(",")))
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for items in [0, 10, 100, 1000].iter() {
        let entry = generate_entry(20, *items);
        group.throughput(Throughput::Elements(*items as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_items", items)),
            items,
            |b, _| b.iter(|| encode(black_box(&entry))),
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for headers in [5, 50, 500].iter() {
        let raw = encode(&generate_entry(*headers, 10));
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_headers", headers)),
            headers,
            |b, _| b.iter(|| decode(black_box(&raw)).unwrap()),
        );
    }

    group.finish();
}

/// Decoding with pseudo-headers and malformed lines mixed in.
fn bench_decode_lenient(c: &mut Criterion) {
    let mut raw = String::from("GET /feed HTTP/2\n:authority: example.com\n:path: /feed\nHost: example.com\n");
    for i in 0..200 {
        raw.push_str(&format!("X-Valid-{}: {}\nbroken line {}\nX-Empty-{}:\n", i, i, i, i));
    }

    c.bench_function("decode_lenient_600_lines", |b| {
        b.iter(|| decode(black_box(&raw)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_decode_lenient);
criterion_main!(benches);
