//! Read-side views over the bookstore documents.
//!
//! Views are built on demand from the document store rather than kept
//! incrementally: order volumes here are small and the store is the
//! single source of truth, so each loader reads the documents it needs
//! and shapes them for one screen:
//! - [`CartContentsView`] — a user's cart with lines expanded from the catalog
//! - [`CustomerOrdersView`] — a user's own orders
//! - [`AdminOrdersView`] — the back-office order list, newest first
//! - [`OrderDetailView`] — one order with book and buyer context

pub mod error;
pub mod views;

pub use error::{ProjectionError, Result};
pub use views::{
    AdminOrderSummary, AdminOrdersView, CartContentsView, CartLineView, CustomerOrderView,
    CustomerOrdersView, OrderDetail, OrderDetailView, OrderLineDetail,
};
