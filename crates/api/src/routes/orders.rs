//! Order creation, quoting and lookup endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{Order, OrderKind, OrderStatus};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

/// Line items keyed `"<itemId>"` for sales and `"<supplierId>:<itemId>"`
/// for purchases.
#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub kind: OrderKind,
    pub items: BTreeMap<String, u32>,
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    pub kind: Option<OrderKind>,
    pub status: Option<OrderStatus>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub created_at: String,
    pub items: BTreeMap<String, u32>,
    pub total: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            kind: order.kind(),
            status: order.status(),
            created_at: order.created_at().to_rfc3339(),
            items: order.line_items().to_raw(),
            total: order.total().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub kind: OrderKind,
    pub total: String,
}

// -- Handlers --

/// POST /orders: create a sale or purchase order.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order_id = state.orders.create_order(req.items, req.kind)?;
    let order = state
        .orders
        .order_by_id(order_id)
        .ok_or_else(|| ApiError::Internal(format!("Order {order_id} missing after creation")))?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// POST /orders/quote: price an order without creating it.
#[tracing::instrument(skip(state, req))]
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let total = state.orders.quote(req.items, req.kind)?;
    Ok(Json(QuoteResponse {
        kind: req.kind,
        total: total.to_string(),
    }))
}

/// GET /orders: list orders in creation order, optionally filtered.
#[tracing::instrument(skip(state, query))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Json<Vec<OrderResponse>> {
    let responses = state
        .orders
        .all_orders()
        .iter()
        .filter(|order| query.kind.is_none_or(|kind| order.kind() == kind))
        .filter(|order| query.status.is_none_or(|status| order.status() == status))
        .map(OrderResponse::from)
        .collect();

    Json(responses)
}

/// GET /orders/{id}: load one order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .orders
        .order_by_id(OrderId::new(id))
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from(&order)))
}
