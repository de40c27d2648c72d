//! Benchmarks for version parsing and comparison.
//!
//! Collectors parse the version banner of every polled service, so parse
//! cost matters more than anything else in this crate.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use sysmon_util::version::{compare_versions, sort_versions, Version};

/// Version banners as reported by common services.
const VERSION_SAMPLES: &[&str] = &[
    "1",
    "1.6.21",
    "2.4.58",
    "5.7.44-log",
    "8.0.36",
    "10.11.6-MariaDB",
    "15.5 (Debian 15.5-1.pgdg120+1)",
    "7.2.4",
    "3.12.1",
    "1.25.3",
];

fn bench_version_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parse");

    group.bench_function("simple", |b| {
        b.iter(|| black_box(Version::parse(black_box("1.6.21"))))
    });

    group.bench_function("with_suffix", |b| {
        b.iter(|| black_box(Version::parse(black_box("10.11.6-MariaDB"))))
    });

    group.bench_function("invalid", |b| {
        b.iter(|| black_box(Version::parse(black_box("unknown"))))
    });

    group.finish();

    c.bench_function("parse_batch_samples", |b| {
        b.iter(|| {
            for text in VERSION_SAMPLES {
                black_box(Version::parse(text).ok());
            }
        });
    });
}

fn bench_version_comparison(c: &mut Criterion) {
    let older = Version::parse("5.7.44").unwrap();
    let newer = Version::parse("8.0.36").unwrap();

    c.bench_function("try_cmp", |b| {
        b.iter(|| black_box(older.try_cmp(&newer)))
    });

    c.bench_function("compare_versions_strings", |b| {
        b.iter(|| black_box(compare_versions("5.7.44", "8.0.36")))
    });
}

fn bench_version_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_sort");

    for size in [10, 50, 100].iter() {
        let versions: Vec<Version> = (0..*size)
            .map(|i| Version::parse(&format!("{}.{}.{}", i % 7, (i / 10) % 10, i % 10)).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut v = versions.clone();
                sort_versions(&mut v).unwrap();
                black_box(v)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_version_parsing,
    bench_version_comparison,
    bench_version_sorting,
);

criterion_main!(benches);
