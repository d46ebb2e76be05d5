//! Order endpoints: checkout, lookups, lifecycle.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::OrderId;
use doc_store::DocumentStore;
use domain::{CheckoutInput, ContactUpdate, Order, OrderStatus};
use projections::{AdminOrderSummary, CustomerOrderView, OrderDetail};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::parse_id;

/// A freshly placed or updated order, with its id on the wire shape.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(flatten)]
    pub order: Order,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// POST /order/create-order — checkout.
#[tracing::instrument(skip(state, input))]
pub async fn create_order<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CheckoutInput>,
) -> Result<ApiResponse<OrderPayload>, ApiError> {
    let (id, order) = state.orders.checkout(user, input).await?;
    Ok(ApiResponse::created(
        OrderPayload { id, order },
        "Order created successfully",
    ))
}

/// GET /order/get-user-order — the current user's orders.
#[tracing::instrument(skip(state))]
pub async fn get_user_orders<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiResponse<Vec<CustomerOrderView>>, ApiError> {
    let orders = state.customer_orders.for_user(user).await?;
    Ok(ApiResponse::ok(orders, "Orders fetched successfully"))
}

/// GET /order/get-single-order/{orderId} — one order, expanded.
#[tracing::instrument(skip(state))]
pub async fn get_single_order<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(_user): CurrentUser,
    Path(order_id): Path<String>,
) -> Result<ApiResponse<OrderDetail>, ApiError> {
    let id: OrderId = parse_id(&order_id)?;
    let detail = state
        .order_detail
        .load(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;
    Ok(ApiResponse::ok(detail, "Order fetched successfully"))
}

/// GET /order/get-all-order — every order, newest first.
#[tracing::instrument(skip(state))]
pub async fn get_all_orders<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(_user): CurrentUser,
) -> Result<ApiResponse<Vec<AdminOrderSummary>>, ApiError> {
    let orders = state.admin_orders.list().await?;
    Ok(ApiResponse::ok(orders, "Orders fetched successfully"))
}

/// PATCH /order/{orderId}/update-status — move along the fulfillment graph.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(_user): CurrentUser,
    Path(order_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<ApiResponse<OrderPayload>, ApiError> {
    let id: OrderId = parse_id(&order_id)?;
    let order = state.orders.update_status(id, req.status).await?;
    Ok(ApiResponse::ok(
        OrderPayload { id, order },
        "Order Status Updated",
    ))
}

/// PATCH /order/update-order/{orderId} — buyer contact correction.
#[tracing::instrument(skip(state, update))]
pub async fn update_order<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(update): Json<ContactUpdate>,
) -> Result<ApiResponse<OrderPayload>, ApiError> {
    let id: OrderId = parse_id(&order_id)?;
    let order = state
        .orders
        .update_shipping_contact(user, id, update)
        .await?;
    Ok(ApiResponse::ok(
        OrderPayload { id, order },
        "Order updated successfully",
    ))
}

/// DELETE /order/delete-order/{orderId} — hard delete.
#[tracing::instrument(skip(state))]
pub async fn delete_order<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(_user): CurrentUser,
    Path(order_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    let id: OrderId = parse_id(&order_id)?;
    state.orders.delete_order(id).await?;
    Ok(ApiResponse::with_status(
        axum::http::StatusCode::OK,
        None,
        "Order deleted successfully",
    ))
}
