//! Supplier directory endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{ItemId, OrderId, SupplierId};
use domain::{Money, SupplierOrderRecord};
use serde::{Deserialize, Serialize};
use warehouse::{Supplier, SupplierDetails, SupplierDirectory, SupplierItem, WarehouseError};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

/// Lists an existing inventory item with this supplier at the given price.
#[derive(Deserialize)]
pub struct AddSupplierItemRequest {
    pub item_id: ItemId,
    pub supplier_price_cents: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct SupplierItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub supplier_price: String,
}

impl From<&SupplierItem> for SupplierItemResponse {
    fn from(item: &SupplierItem) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            supplier_price: item.supplier_price().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct SupplierResponse {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub items: Vec<SupplierItemResponse>,
}

impl From<&Supplier> for SupplierResponse {
    fn from(supplier: &Supplier) -> Self {
        let details = supplier.details();
        Self {
            id: supplier.id(),
            name: details.name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            location: details.location.clone(),
            items: supplier.items().map(SupplierItemResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct SupplierOrderResponse {
    pub order_id: OrderId,
    pub date: String,
    pub total: String,
    pub items: BTreeMap<ItemId, u32>,
}

impl From<&SupplierOrderRecord> for SupplierOrderResponse {
    fn from(record: &SupplierOrderRecord) -> Self {
        Self {
            order_id: record.order_id(),
            date: record.date().to_rfc3339(),
            total: record.total().to_string(),
            items: record.items().clone(),
        }
    }
}

// -- Handlers --

/// GET /suppliers: list suppliers with their listings.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<SupplierResponse>> {
    let suppliers = state.suppliers().read();
    Json(suppliers.suppliers().map(SupplierResponse::from).collect())
}

/// POST /suppliers: register a supplier.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Supplier name must not be empty".to_string(),
        ));
    }

    let mut suppliers = state.suppliers().write();
    let id = suppliers.add_supplier(SupplierDetails::new(
        req.name,
        req.email,
        req.phone,
        req.location,
    ));
    let supplier = suppliers
        .find_supplier_by_id(id)
        .ok_or(WarehouseError::SupplierNotFound(id))?;

    tracing::info!(supplier_id = %id, "supplier added");
    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

/// POST /suppliers/{id}/items: list an inventory item with a supplier.
#[tracing::instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(req): Json<AddSupplierItemRequest>,
) -> Result<(StatusCode, Json<SupplierItemResponse>), ApiError> {
    if req.supplier_price_cents < 0 {
        return Err(ApiError::BadRequest(
            "Supplier price must not be negative".to_string(),
        ));
    }

    let supplier_id = SupplierId::new(id);
    let inventory = state.inventory().read();
    let item = inventory
        .items()
        .find(|item| item.id() == req.item_id)
        .ok_or(WarehouseError::ItemNotFound(req.item_id))?;

    let listing = state.suppliers().write().create_supplier_item(
        supplier_id,
        item,
        Money::from_cents(req.supplier_price_cents),
    )?;

    tracing::info!(%supplier_id, item_id = %req.item_id, "supplier item listed");
    Ok((StatusCode::CREATED, Json(SupplierItemResponse::from(&listing))))
}

/// GET /suppliers/{id}/orders: the supplier's purchase order history.
pub async fn order_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<SupplierOrderResponse>>, ApiError> {
    let supplier_id = SupplierId::new(id);
    let suppliers = state.suppliers().read();
    let supplier = suppliers
        .find_supplier_by_id(supplier_id)
        .ok_or(WarehouseError::SupplierNotFound(supplier_id))?;

    Ok(Json(
        supplier
            .order_history()
            .iter()
            .map(SupplierOrderResponse::from)
            .collect(),
    ))
}
