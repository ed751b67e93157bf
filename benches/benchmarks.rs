use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use partyline::{create_store, use_store, with_stores, Memo, Props, Signal, StoreProvider};

fn signal_creation_benchmark(c: &mut Criterion) {
    c.bench_function("signal_creation", |b| {
        b.iter(|| {
            let signal: Signal<i32> = Signal::new(black_box(42));
            signal
        });
    });
}

fn signal_read_benchmark(c: &mut Criterion) {
    let signal: Signal<i32> = Signal::new(42);

    c.bench_function("signal_read", |b| {
        b.iter(|| {
            black_box(signal.get());
        });
    });
}

fn signal_write_benchmark(c: &mut Criterion) {
    let signal: Signal<i32> = Signal::new(0);

    c.bench_function("signal_write", |b| {
        let mut i = 0;
        b.iter(|| {
            signal.set(black_box(i));
            i += 1;
        });
    });
}

fn memo_computation_benchmark(c: &mut Criterion) {
    let a: Signal<i32> = Signal::new(5);
    let b: Signal<i32> = Signal::new(10);

    let sum = Memo::new({
        let a = a.clone();
        let b = b.clone();
        move || a.get() + b.get()
    });

    c.bench_function("memo_computation", |b| {
        b.iter(|| {
            black_box(sum.get());
        });
    });
}

fn store_mount_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_mount");

    for store_count in [1, 10, 100].iter() {
        let descriptors: Vec<_> = (0..*store_count)
            .map(|i| create_store(format!("store{i}"), || 0i32))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(store_count),
            store_count,
            |b, _| {
                b.iter(|| {
                    black_box(StoreProvider::mount(&descriptors).unwrap());
                });
            },
        );
    }
    group.finish();
}

fn store_locate_benchmark(c: &mut Criterion) {
    let provider = StoreProvider::mount(&[create_store("value", || 42i32)]).unwrap();

    c.bench_function("store_locate", |b| {
        provider.scope(|| {
            b.iter(|| {
                black_box(use_store::<i32>("value").unwrap());
            });
        });
    });
}

fn scope_enter_benchmark(c: &mut Criterion) {
    let provider = StoreProvider::mount(&[create_store("value", || 42i32)]).unwrap();

    c.bench_function("scope_enter", |b| {
        b.iter(|| {
            provider.scope(|| black_box(()));
        });
    });
}

fn injected_render_benchmark(c: &mut Criterion) {
    let provider = StoreProvider::mount(&[create_store("value", || 42i32)]).unwrap();

    let wrapped = with_stores(
        |props: Props| *props.get::<i32>("value").unwrap(),
        &["value"],
    );

    c.bench_function("injected_render", |b| {
        provider.scope(|| {
            b.iter(|| {
                black_box(wrapped.render(Props::new()).unwrap());
            });
        });
    });
}

criterion_group!(
    benches,
    signal_creation_benchmark,
    signal_read_benchmark,
    signal_write_benchmark,
    memo_computation_benchmark,
    store_mount_benchmark,
    store_locate_benchmark,
    scope_enter_benchmark,
    injected_render_benchmark,
);
criterion_main!(benches);
