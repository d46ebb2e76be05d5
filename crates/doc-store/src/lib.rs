//! Document persistence for the bookstore backend.
//!
//! Entities are stored as versioned JSON documents grouped into named
//! collections. Every mutation goes through a compare-and-swap
//! [`DocumentStore::replace`] keyed on the document version, which gives
//! callers per-document atomic read-modify-write without any shared
//! in-process state.

pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use document::{Document, Version};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::DocumentStore;
