//! Criterion micro-benchmarks for input table push and removal.

use cobj_bench::id_sequence;
use cobj_core::InputId;
use cobj_store::InputTable;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Benchmark: 1K pushes over 32 distinct ids into a 32-slot table.
fn bench_input_push_replace(c: &mut Criterion) {
    let ids = id_sequence(1000, 32, 42);
    c.bench_function("input_push_replace_1k", |b| {
        b.iter(|| {
            let mut table = InputTable::new(32);
            for (i, &id) in ids.iter().enumerate() {
                table.push(id, i as i16, 0, i);
            }
            black_box(table.load());
        });
    });
}

/// Benchmark: fill a 256-slot table, then pull every entry from the front.
fn bench_input_pull_front(c: &mut Criterion) {
    c.bench_function("input_pull_front_256", |b| {
        b.iter(|| {
            let mut table = InputTable::new(256);
            for id in 0..256 {
                table.push(InputId(id), 0, 0, id);
            }
            while table.load() > 0 {
                table.pull_index(0);
            }
            black_box(table.capacity());
        });
    });
}

criterion_group!(benches, bench_input_push_replace, bench_input_pull_front);
criterion_main!(benches);
