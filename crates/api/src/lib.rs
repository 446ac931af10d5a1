//! HTTP API server with observability for the warehouse order system.
//!
//! Provides REST endpoints for orders, inventory, suppliers and financial
//! reports, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use fulfillment::{OrderService, TokioScheduler};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use warehouse::{InMemoryInventory, InMemorySuppliers, Shared, shared};

use config::Config;
use error::ApiError;

/// The order service as wired into the server.
pub type Orders = OrderService<InMemoryInventory, InMemorySuppliers, TokioScheduler>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orders: Orders,
}

impl AppState {
    pub fn inventory(&self) -> &Shared<InMemoryInventory> {
        self.orders.inventory()
    }

    pub fn suppliers(&self) -> &Shared<InMemorySuppliers> {
        self.orders.suppliers()
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/orders", post(routes::orders::create).get(routes::orders::list))
        .route("/orders/quote", post(routes::orders::quote))
        .route("/orders/{id}", get(routes::orders::get))
        .route(
            "/inventory",
            get(routes::inventory::list).post(routes::inventory::create),
        )
        .route("/inventory/low-stock", get(routes::inventory::low_stock))
        .route(
            "/suppliers",
            get(routes::suppliers::list).post(routes::suppliers::create),
        )
        .route("/suppliers/{id}/items", post(routes::suppliers::add_item))
        .route("/suppliers/{id}/orders", get(routes::suppliers::order_history))
        .route("/reports/financial", get(routes::reports::financial))
        .route("/reports/transactions", get(routes::reports::transactions))
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

/// Creates the application state: stores, optional demo data and the order
/// service with tokio-driven delivery timers.
///
/// Must be called from within a tokio runtime.
pub fn create_default_state(config: &Config) -> Result<Arc<AppState>, ApiError> {
    let (inventory, suppliers) = if config.seed_demo_data {
        seed::demo_stores()?
    } else {
        (InMemoryInventory::new(), InMemorySuppliers::new())
    };

    let scheduler = TokioScheduler::current()?;
    let orders = OrderService::new(shared(inventory), shared(suppliers), scheduler)
        .with_delivery_config(config.delivery);

    Ok(Arc::new(AppState { orders }))
}
