use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use explorer_core::model::entries::{FileEntry, FileType};
use explorer_core::search::{format_search_results, highlight_match, sort_search_results};

const NAMES: [&str; 8] = [
    "report.pdf",
    "Report-final.docx",
    "annual_report_2024.xlsx",
    "notes.txt",
    "REPORT",
    "holiday.jpg",
    "reporter.png",
    "draft-report.md",
];

fn hits(n: usize) -> Vec<FileEntry> {
    (0..n)
        .map(|i| {
            let name = format!("{}-{i}", NAMES[i % NAMES.len()]);
            let path = format!("/home/user/projects/area{}/docs/{name}", i % 13);
            FileEntry::new(name, path, (i as u64) * 1024, "Unknown", FileType::File)
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_search_results");
    for size in [100usize, 1_000, 10_000] {
        let results = hits(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &results, |b, results| {
            b.iter(|| sort_search_results(black_box(results), black_box("report")));
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_search_results");
    for size in [100usize, 1_000] {
        let results = hits(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &results, |b, results| {
            b.iter(|| format_search_results(black_box(results), black_box("report"), 60));
        });
    }
    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    c.bench_function("highlight_match/repeated", |b| {
        b.iter(|| highlight_match(black_box("report-REPORT-report-notes-report.txt"), black_box("report")));
    });
}

criterion_group!(benches, bench_sort, bench_format, bench_highlight);
criterion_main!(benches);
