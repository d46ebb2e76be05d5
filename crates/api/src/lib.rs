//! HTTP API server for the bookstore cart-to-order workflow.
//!
//! Exposes the cart and order endpoints behind a gateway that handles
//! authentication (see [`identity`]), with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;
pub mod identity;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use doc_store::DocumentStore;
use domain::{CartService, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{AdminOrdersView, CartContentsView, CustomerOrdersView, OrderDetailView};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: DocumentStore> {
    pub carts: CartService<S>,
    pub orders: OrderService<S>,
    pub cart_view: CartContentsView<S>,
    pub customer_orders: CustomerOrdersView<S>,
    pub admin_orders: AdminOrdersView<S>,
    pub order_detail: OrderDetailView<S>,
    pub store: S,
}

/// Builds the application state over one document store.
pub fn create_state<S: DocumentStore + Clone>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        carts: CartService::new(store.clone()),
        orders: OrderService::new(store.clone()),
        cart_view: CartContentsView::new(store.clone()),
        customer_orders: CustomerOrdersView::new(store.clone()),
        admin_orders: AdminOrdersView::new(store.clone()),
        order_detail: OrderDetailView::new(store.clone()),
        store,
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStore + Clone>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/cart", get(routes::cart::get_cart::<S>))
        .route(
            "/cart/add-to-cart/{bookId}",
            post(routes::cart::add_to_cart::<S>),
        )
        .route(
            "/cart/update-cart/{bookId}",
            put(routes::cart::update_cart::<S>),
        )
        .route(
            "/cart/delete-cart/{bookId}",
            delete(routes::cart::delete_from_cart::<S>),
        )
        .route("/cart/clear-cart", delete(routes::cart::clear_cart::<S>))
        .route(
            "/order/create-order",
            post(routes::orders::create_order::<S>),
        )
        .route(
            "/order/get-user-order",
            get(routes::orders::get_user_orders::<S>),
        )
        .route(
            "/order/get-single-order/{orderId}",
            get(routes::orders::get_single_order::<S>),
        )
        .route(
            "/order/get-all-order",
            get(routes::orders::get_all_orders::<S>),
        )
        .route(
            "/order/{orderId}/update-status",
            patch(routes::orders::update_status::<S>),
        )
        .route(
            "/order/update-order/{orderId}",
            patch(routes::orders::update_order::<S>),
        )
        .route(
            "/order/delete-order/{orderId}",
            delete(routes::orders::delete_order::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
