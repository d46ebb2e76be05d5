//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use doc_store::DocumentStore;
use domain::{Cart, CartAddOutcome};
use projections::CartLineView;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::parse_id;

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// GET /cart — the current user's cart with lines expanded.
#[tracing::instrument(skip(state))]
pub async fn get_cart<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiResponse<Vec<CartLineView>>, ApiError> {
    let lines = state.cart_view.for_user(user).await?;
    if lines.is_empty() {
        return Ok(ApiResponse::with_status(
            axum::http::StatusCode::OK,
            None,
            "No items in the cart",
        ));
    }
    Ok(ApiResponse::ok(lines, "Cart fetched successfully"))
}

/// POST /cart/add-to-cart/{bookId} — add one copy of a book.
#[tracing::instrument(skip(state))]
pub async fn add_to_cart<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<Cart>, ApiError> {
    let book = parse_id(&book_id)?;
    match state.carts.add_line(user, book).await? {
        CartAddOutcome::Created(cart) => Ok(ApiResponse::created(cart, "Book added to cart")),
        CartAddOutcome::Updated(cart) => Ok(ApiResponse::ok(cart, "Book added to cart")),
        CartAddOutcome::UnknownBook => Ok(ApiResponse::with_status(
            axum::http::StatusCode::OK,
            None,
            "No items in the cart",
        )),
    }
}

/// PUT /cart/update-cart/{bookId} — set a line's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_cart<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<ApiResponse<Cart>, ApiError> {
    let book = parse_id(&book_id)?;
    let cart = state.carts.set_line_quantity(user, book, req.quantity).await?;
    Ok(ApiResponse::ok(cart, "Cart updated"))
}

/// DELETE /cart/delete-cart/{bookId} — remove a line.
#[tracing::instrument(skip(state))]
pub async fn delete_from_cart<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<Cart>, ApiError> {
    let book = parse_id(&book_id)?;
    let cart = state.carts.remove_line(user, book).await?;
    Ok(ApiResponse::ok(cart, "Book removed from cart"))
}

/// DELETE /cart/clear-cart — empty the cart.
#[tracing::instrument(skip(state))]
pub async fn clear_cart<S: DocumentStore + Clone>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiResponse<Cart>, ApiError> {
    let cart = state.carts.clear_cart(user).await?;
    Ok(ApiResponse::ok(cart, "Cart cleared"))
}
