//! Benchmarks for the constraint layout solver and its cache.
//!
//! Run with: cargo bench -p tessel-layout --bench layout_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessel_core::Rect;
use tessel_layout::{Constraint, Layout, LayoutCache};

fn mixed_constraints(count: usize) -> Vec<Constraint> {
    (0..count)
        .map(|i| match i % 4 {
            0 => Constraint::Length(3),
            1 => Constraint::Ratio(1, 4),
            2 => Constraint::Max(12),
            _ => Constraint::Min(1),
        })
        .collect()
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/split");
    let area = Rect::new(0, 0, 200, 60);

    for count in [2, 8, 32] {
        let layout = Layout::horizontal(mixed_constraints(count));
        group.bench_with_input(BenchmarkId::new("solve", count), &layout, |b, layout| {
            b.iter(|| black_box(layout.split(black_box(area))))
        });
    }

    group.finish();
}

fn bench_split_cached(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/cached");
    let area = Rect::new(0, 0, 200, 60);

    for count in [2, 8, 32] {
        let layout = Layout::vertical(mixed_constraints(count));
        let mut cache = LayoutCache::default();
        layout.split_cached(area, &mut cache);
        group.bench_with_input(BenchmarkId::new("hit", count), &layout, |b, layout| {
            b.iter(|| black_box(layout.split_cached(black_box(area), &mut cache)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_split_cached);
criterion_main!(benches);
