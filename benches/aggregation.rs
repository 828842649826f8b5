//! Benchmarks for list parsing and rendering.

use chrono::Utc;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use hostmerge::parser::{parse_adblock, parse_hosts, parse_plain};
use hostmerge::serializer::render;

/// Generate distinct domain names
fn generate_domains(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("host{}.sub{}.example{}.com", i, i % 97, i % 13))
        .collect()
}

fn hosts_content(domains: &[String]) -> String {
    let mut out = String::from("127.0.0.1 localhost\n");
    for d in domains {
        out.push_str("0.0.0.0 ");
        out.push_str(d);
        out.push('\n');
    }
    out
}

fn adblock_content(domains: &[String]) -> String {
    let mut out = String::from("! Title: bench\n");
    for (i, d) in domains.iter().enumerate() {
        out.push_str("||");
        out.push_str(d);
        out.push_str(if i % 3 == 0 { "^$third-party\n" } else { "^\n" });
    }
    out
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1_000, 10_000, 100_000] {
        let domains = generate_domains(size);
        let hosts = hosts_content(&domains);
        let adblock = adblock_content(&domains);
        let plain = domains.join("\n");

        group.bench_with_input(BenchmarkId::new("hosts", size), &hosts, |b, content| {
            b.iter(|| black_box(parse_hosts(content)))
        });
        group.bench_with_input(BenchmarkId::new("adblock", size), &adblock, |b, content| {
            b.iter(|| black_box(parse_adblock(content)))
        });
        group.bench_with_input(BenchmarkId::new("plain", size), &plain, |b, content| {
            b.iter(|| black_box(parse_plain(content)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let now = Utc::now();

    for size in [1_000, 10_000, 100_000] {
        let set = parse_plain(&generate_domains(size).join("\n"));
        group.bench_with_input(BenchmarkId::from_parameter(size), &set, |b, set| {
            b.iter(|| black_box(render(set, now)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsers, bench_render);
criterion_main!(benches);
