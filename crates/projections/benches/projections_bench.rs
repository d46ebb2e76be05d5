use common::{BookId, Money, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use doc_store::{Document, InMemoryStore};
use domain::order::{Order, price_checkout};
use domain::{Address, Book, ShippingDetails, collections};
use projections::{AdminOrdersView, CustomerOrdersView, OrderDetailView};

fn shipping(n: usize) -> ShippingDetails {
    ShippingDetails {
        name: format!("Buyer {n}"),
        email: format!("buyer{n}@example.com"),
        phone: "555-0100".into(),
        address: Address {
            street: "1 Bench Way".into(),
            city: "Benchville".into(),
        },
    }
}

async fn seed_book(store: &InMemoryStore, n: usize) -> BookId {
    let id = BookId::new();
    let book = Book {
        title: format!("Book {n}"),
        author: "Bench Author".into(),
        description: "Benchmark listing".into(),
        genre: "Fiction".into(),
        publication_year: 2020,
        isbn: format!("978-0-00-{n:06}"),
        availability: true,
        price: Money::from_units(20),
        cover_image: None,
    };
    store
        .insert(
            collections::BOOKS,
            Document::new(id.as_uuid(), &book).unwrap(),
        )
        .await
        .unwrap();
    id
}

async fn seed_orders(store: &InMemoryStore, owner: UserId, count: usize) -> common::OrderId {
    let book = seed_book(store, 0).await;
    let mut last = common::OrderId::new();
    for n in 0..count {
        let order = Order::place(
            owner,
            price_checkout([(book, 2, Money::from_units(20))]),
            shipping(n),
            None,
        );
        last = common::OrderId::new();
        store
            .insert(
                collections::ORDERS,
                Document::new(last.as_uuid(), &order).unwrap(),
            )
            .await
            .unwrap();
    }
    last
}

fn bench_admin_list_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    rt.block_on(seed_orders(&store, UserId::new(), 100));
    let view = AdminOrdersView::new(store);

    c.bench_function("projections/admin_list_100_orders", |b| {
        b.iter(|| {
            rt.block_on(async {
                let rows = view.list().await.unwrap();
                assert_eq!(rows.len(), 100);
            });
        });
    });
}

fn bench_customer_orders(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let owner = UserId::new();
    rt.block_on(seed_orders(&store, owner, 20));
    let view = CustomerOrdersView::new(store);

    c.bench_function("projections/customer_orders_20", |b| {
        b.iter(|| {
            rt.block_on(async {
                let views = view.for_user(owner).await.unwrap();
                assert_eq!(views.len(), 20);
            });
        });
    });
}

fn bench_order_detail(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let order_id = rt.block_on(seed_orders(&store, UserId::new(), 1));
    let view = OrderDetailView::new(store);

    c.bench_function("projections/order_detail", |b| {
        b.iter(|| {
            rt.block_on(async {
                view.load(order_id).await.unwrap().unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_admin_list_100,
    bench_customer_orders,
    bench_order_detail,
);
criterion_main!(benches);
