use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{NewOrderItem, OrderLifecycleManager};
use record_store::{Customer, MemoryStore, Product};

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = MemoryStore::new();
    let (customer, product) = rt.block_on(async {
        let customer = store
            .add_customer(Customer::new("Bench", "bench@example.com", None))
            .await
            .unwrap();
        let product = store
            .add_product(Product::new(
                "Widget",
                "SKU-BENCH",
                Money::new("10.00".parse().unwrap()),
                u32::MAX,
            ))
            .await
            .unwrap();
        (customer, product)
    });
    let manager = OrderLifecycleManager::new(store);

    c.bench_function("domain/create_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                manager
                    .create_order(customer.id, vec![NewOrderItem::new(product.id, 1)])
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_finalize_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = MemoryStore::new();
    let (customer, product) = rt.block_on(async {
        let customer = store
            .add_customer(Customer::new("Bench", "bench@example.com", None))
            .await
            .unwrap();
        let product = store
            .add_product(Product::new(
                "Widget",
                "SKU-BENCH",
                Money::new("10.00".parse().unwrap()),
                u32::MAX,
            ))
            .await
            .unwrap();
        (customer, product)
    });
    let manager = OrderLifecycleManager::new(store);

    c.bench_function("domain/finalize_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let created = manager
                    .create_order(customer.id, vec![NewOrderItem::new(product.id, 1)])
                    .await
                    .unwrap();
                manager.finalize_order(created.order.id).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_create_order, bench_finalize_order);
criterion_main!(benches);
