use common::{BookId, Money, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use doc_store::{Document, InMemoryStore};
use domain::{
    Book, CartService, CheckoutInput, LineRequest, OrderService, OrderStatus, User, collections,
    order::price_checkout,
};

fn sample_book(n: u32) -> Book {
    Book {
        title: format!("Book {n}"),
        author: "Bench Author".into(),
        description: "Benchmark listing".into(),
        genre: "Fiction".into(),
        publication_year: 2020,
        isbn: format!("978-0-00-{n:06}"),
        availability: true,
        price: Money::from_units(20 + n as i64),
        cover_image: None,
    }
}

fn sample_user() -> User {
    User {
        username: "bench".into(),
        email: "bench@example.com".into(),
        avatar: "https://cdn.example/avatars/bench.png".into(),
        role: "member".into(),
        order_history: Vec::new(),
    }
}

async fn seed_book(store: &InMemoryStore, n: u32) -> BookId {
    let id = BookId::new();
    store
        .insert(
            collections::BOOKS,
            Document::new(id.as_uuid(), &sample_book(n)).unwrap(),
        )
        .await
        .unwrap();
    id
}

async fn seed_user(store: &InMemoryStore) -> UserId {
    let id = UserId::new();
    store
        .insert(
            collections::USERS,
            Document::new(id.as_uuid(), &sample_user()).unwrap(),
        )
        .await
        .unwrap();
    id
}

fn checkout_input(books: Vec<LineRequest>) -> CheckoutInput {
    CheckoutInput {
        books,
        name: "Bench Buyer".into(),
        email: "bench@example.com".into(),
        phone: "555-0100".into(),
        street: "1 Bench Way".into(),
        city: "Benchville".into(),
        notes: None,
    }
}

fn bench_add_to_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let book = rt.block_on(seed_book(&store, 1));
    let user = rt.block_on(seed_user(&store));
    let service = CartService::new(store);

    c.bench_function("domain/add_to_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.add_line(user, book).await.unwrap();
            });
        });
    });
}

fn bench_price_checkout(c: &mut Criterion) {
    let items: Vec<(BookId, u32, Money)> = (1..=20)
        .map(|n| (BookId::new(), n, Money::from_cents(100 * n as i64)))
        .collect();

    c.bench_function("domain/price_checkout_20_lines", |b| {
        b.iter(|| {
            let priced = price_checkout(items.iter().copied());
            assert!(!priced.total_amount.is_zero());
        });
    });
}

fn bench_checkout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let books: Vec<BookId> = rt.block_on(async {
        let mut ids = Vec::new();
        for n in 1..=5 {
            ids.push(seed_book(&store, n).await);
        }
        ids
    });
    let user = rt.block_on(seed_user(&store));
    let service = OrderService::new(store);
    let lines: Vec<LineRequest> = books
        .iter()
        .map(|&book| LineRequest { book, quantity: 2 })
        .collect();

    c.bench_function("domain/checkout_5_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .checkout(user, checkout_input(lines.clone()))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_full_order_lifecycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/checkout_process_deliver", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryStore::new();
                let book = seed_book(&store, 1).await;
                let user = seed_user(&store).await;
                let service = OrderService::new(store);

                let (order_id, _) = service
                    .checkout(user, checkout_input(vec![LineRequest { book, quantity: 1 }]))
                    .await
                    .unwrap();
                service
                    .update_status(order_id, OrderStatus::Processing)
                    .await
                    .unwrap();
                service
                    .update_status(order_id, OrderStatus::Delivered)
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_add_to_cart,
    bench_price_checkout,
    bench_checkout,
    bench_full_order_lifecycle,
);
criterion_main!(benches);
