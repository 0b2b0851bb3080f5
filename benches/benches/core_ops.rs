// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use bracken_catalog::{Catalog, EntryId, Projection, Ring};
use bracken_filter::substring_filter;

fn make_catalog(n: usize) -> Catalog<usize, String> {
    let projection = Projection::text(|i: &usize| Some(format!("entry {i:06}")));
    Catalog::build(0..n, &projection)
}

fn bench_relink(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_relink");
    for n in [100_usize, 1_000, 10_000] {
        let catalog = make_catalog(n);
        let ids: Vec<EntryId> = catalog.ids().collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("full/{n}"), |b| {
            b.iter_batched(
                || ids.clone(),
                |ids| {
                    let mut ring = Ring::new();
                    ring.relink(ids);
                    black_box(ring.len())
                },
                BatchSize::SmallInput,
            );
        });
        // Narrowing relink over every other entry, the filter-pass shape.
        let subset: Vec<EntryId> = ids.iter().copied().step_by(2).collect();
        group.bench_function(format!("subset/{n}"), |b| {
            b.iter_batched(
                || subset.clone(),
                |subset| {
                    let mut ring = Ring::new();
                    ring.relink(subset);
                    black_box(ring.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_substring_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring_filter");
    for n in [100_usize, 1_000, 10_000] {
        let catalog = make_catalog(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("hit_some/{n}"), |b| {
            b.iter(|| black_box(substring_filter(&catalog, black_box("42"))));
        });
        group.bench_function(format!("hit_none/{n}"), |b| {
            b.iter(|| black_box(substring_filter(&catalog, black_box("zzz"))));
        });
        group.bench_function(format!("empty_query/{n}"), |b| {
            b.iter(|| black_box(substring_filter(&catalog, black_box(""))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_relink, bench_substring_filter);
criterion_main!(benches);
