use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use salestrack::aggregate;
use salestrack::filter::Selection;
use salestrack::storage::{InMemoryStorage, Store};
use salestrack::{Collection, Record};

const AREAS: [&str; 6] = ["north", "south", "east", "west", "central", "coast"];

fn setup() -> (Store, Collection) {
    let store = Store::new(Arc::new(InMemoryStorage::new()));
    let collection = seed_data(&store);
    (store, collection)
}

fn seed_data(store: &Store) -> Collection {
    let mut collection = Collection::new();
    for i in 0..10_000i64 {
        let record = Record::new(
            format!("S{}", i % 50),
            AREAS[(i % AREAS.len() as i64) as usize],
            Decimal::new(i * 37 % 100_000, 2),
            i % 12 + 1,
            2015 + i % 10,
        )
        .unwrap();
        collection = store.append(collection, record);
    }
    store.persist(&collection).unwrap();
    collection
}

fn bench_filter(c: &mut Criterion) {
    let (_store, collection) = setup();
    let selection = Selection::all(&collection).narrow(&["north", "coast"], &[2018, 2019, 2020]);

    c.bench_function("filter_selection", |b| {
        b.iter(|| selection.apply(black_box(&collection)))
    });
}

fn bench_sum_by(c: &mut Criterion) {
    let (_store, collection) = setup();

    c.bench_function("sum_by_area", |b| {
        b.iter(|| aggregate::sum_by_area(black_box(&collection)))
    });

    c.bench_function("sum_by_month", |b| {
        b.iter(|| aggregate::sum_by_month(black_box(&collection)))
    });
}

fn bench_load(c: &mut Criterion) {
    let (store, _collection) = setup();

    c.bench_function("store_load", |b| {
        b.iter(|| store.load().unwrap())
    });
}

criterion_group!(benches, bench_filter, bench_sum_by, bench_load);
criterion_main!(benches);
