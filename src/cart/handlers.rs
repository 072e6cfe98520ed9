//! REST API handlers for cart items
//!
//! Each handler performs exactly one store operation and maps its outcome
//! onto an HTTP status. Routes are relative; the router nests them under
//! `/cart-items`.

use super::{error::ApiError, helpers::*, models::*, state::SharedState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

/// Creates routes for cart item operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_cart_items).post(create_cart_item))
        .route("/search", get(search_cart_items))
        .route(
            "/:id",
            get(get_cart_item)
                .put(replace_cart_item)
                .delete(delete_cart_item),
        )
}

/// Endpoint: GET /
/// Returns every cart item.
async fn list_cart_items(
    State(state): State<SharedState>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

/// Endpoint: GET /search?product=&maxPrice=&pageSize=
/// Returns the items matching every provided term.
///
/// The query string is decoded as plain pairs so that repeated keys are
/// joined rather than rejected.
async fn search_cart_items(
    State(state): State<SharedState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let Query(pairs) = query?;
    let filter = SearchFilter::from_params(&SearchParams::from_pairs(pairs));
    tracing::debug!(?filter, "Searching cart items");

    let items = state.store.search(&filter).await?;
    Ok(Json(items))
}

/// Endpoint: GET /:id
async fn get_cart_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CartItem>, ApiError> {
    let id = parse_id(&id)?;

    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Endpoint: POST /
/// Stores a new item and echoes it with its assigned `_id`.
async fn create_cart_item(
    State(state): State<SharedState>,
    payload: Result<Json<NewCartItem>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(item) = payload?;

    let created = state.store.create(item.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Endpoint: PUT /:id
/// Overwrites the whole stored item; the path `id` is authoritative.
async fn replace_cart_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<NewCartItem>, JsonRejection>,
) -> Result<Json<CartItem>, ApiError> {
    let id = parse_id(&id)?;
    let Json(item) = payload?;

    state
        .store
        .replace(id, item.into())
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Endpoint: DELETE /:id
async fn delete_cart_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if state.store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
