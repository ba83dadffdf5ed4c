//! Basic benchmarks for the `value_box` package.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use value_box::ValueBox;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("vb_lifecycle");

    group.bench_function("empty", |b| {
        b.iter(|| {
            drop(black_box(ValueBox::<TestItem>::empty()));
        });
    });

    group.bench_function("new_drop", |b| {
        b.iter(|| {
            drop(black_box(ValueBox::new(TEST_VALUE)));
        });
    });

    group.bench_function("clone", |b| {
        let original = ValueBox::new(TEST_VALUE);
        b.iter(|| original.clone());
    });

    group.bench_function("set_over_existing", |b| {
        let mut boxed = ValueBox::new(TEST_VALUE);
        b.iter(|| {
            boxed.set(black_box(TEST_VALUE));
        });
    });

    group.finish();

    let mut access_group = c.benchmark_group("vb_access");

    access_group.bench_function("deref", |b| {
        let boxed = ValueBox::new(TEST_VALUE);
        b.iter(|| **black_box(&boxed) + 1);
    });

    access_group.bench_function("value_or", |b| {
        let empty = ValueBox::<TestItem>::empty();
        b.iter(|| empty.value_or(black_box(TEST_VALUE)));
    });

    access_group.finish();
}
