//! Inventory listing and creation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::ItemId;
use domain::Money;
use serde::{Deserialize, Serialize};
use warehouse::InventoryItem;

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateItemRequest {
    /// Defaults to the next free ID.
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct InventoryItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub unit_price: String,
    pub quantity: u32,
}

impl From<&InventoryItem> for InventoryItemResponse {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            unit_price: item.unit_price().to_string(),
            quantity: item.quantity(),
        }
    }
}

/// GET /inventory: list every item by ID.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<InventoryItemResponse>> {
    let inventory = state.inventory().read();
    Json(inventory.items().map(InventoryItemResponse::from).collect())
}

/// GET /inventory/low-stock: items below the restock threshold.
pub async fn low_stock(State(state): State<Arc<AppState>>) -> Json<Vec<InventoryItemResponse>> {
    let inventory = state.inventory().read();
    Json(
        inventory
            .low_stock()
            .into_iter()
            .map(InventoryItemResponse::from)
            .collect(),
    )
}

/// POST /inventory: add a new item.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<InventoryItemResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Item name must not be empty".to_string()));
    }
    if req.unit_price_cents < 0 {
        return Err(ApiError::BadRequest(
            "Unit price must not be negative".to_string(),
        ));
    }

    let mut inventory = state.inventory().write();
    let id = req.id.unwrap_or_else(|| inventory.next_available_id());
    let item = InventoryItem::new(
        id,
        req.name,
        req.description,
        Money::from_cents(req.unit_price_cents),
        req.quantity,
    );
    let response = InventoryItemResponse::from(&item);
    inventory.add_item(item)?;

    tracing::info!(item_id = %id, "inventory item added");
    Ok((StatusCode::CREATED, Json(response)))
}
