//! Shared types used across the bookstore backend crates.

mod types;

pub use types::{BookId, Money, OrderId, UserId};
