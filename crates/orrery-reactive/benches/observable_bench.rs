//! Benchmarks for observable notification and link recomputation.
//!
//! Run with: cargo bench -p orrery-reactive

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use orrery_reactive::{MultiLink, Observable};
use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

// ============================================================================
// Notification fan-out
// ============================================================================

fn bench_set_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("observable/set");

    for listeners in [1usize, 8, 64] {
        let value = Observable::new(0u64);
        let sink = Rc::new(Cell::new(0u64));
        for _ in 0..listeners {
            let sink = Rc::clone(&sink);
            value.observe(move |new, _| sink.set(sink.get() + new));
        }

        let mut next = 0u64;
        group.bench_with_input(
            BenchmarkId::new("fanout", listeners),
            &(),
            |b, _| {
                b.iter(|| {
                    next = next.wrapping_add(1);
                    value.set(next);
                    black_box(sink.get());
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// MultiLink recomputation
// ============================================================================

fn bench_multilink_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("multilink/recompute");

    let a = Observable::new(0u64);
    let b = Observable::new(0u64);
    let c2 = Observable::new(0u64);
    let d = Observable::new(0u64);
    let out = Rc::new(Cell::new(0u64));
    let out_clone = Rc::clone(&out);
    let _link = MultiLink::link4(&a, &b, &c2, &d, move |a, b, c, d| {
        out_clone.set(a + b + c + d);
    });

    let mut next = 0u64;
    group.bench_function("link4_single_dep_change", |bench| {
        bench.iter(|| {
            next = next.wrapping_add(1);
            a.set(next);
            black_box(out.get());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_set_fanout, bench_multilink_recompute);
criterion_main!(benches);
