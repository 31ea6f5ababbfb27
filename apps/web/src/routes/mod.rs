//! # Web Routes
//!
//! The four views, each a thin handler over the store:
//!
//! - [`sales`] - barcode lookup + confirm, manual entry + confirm
//! - [`inventory`] - read-only catalog table with low-stock flags
//! - [`revenue`] - daily total, rows, xlsx export
//! - [`registration`] - product form with margin-based price suggestion
//!
//! Handlers hold no state of their own: every response is recomputed from
//! current store state plus the request, so nothing stale survives between
//! interactions.

use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use banca_core::Product;

use crate::state::AppState;

pub mod inventory;
pub mod registration;
pub mod revenue;
pub mod sales;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Sales view
        .route("/api/sales/lookup", get(sales::lookup))
        .route("/api/sales/barcode", post(sales::record_barcode_sale))
        .route("/api/sales/manual", post(sales::record_manual_sale))
        // Inventory view
        .route("/api/inventory", get(inventory::inventory))
        // Revenue view
        .route("/api/revenue", get(revenue::revenue))
        .route("/api/revenue/export", get(revenue::export_xlsx))
        // Registration view
        .route(
            "/api/registration/suggested-price",
            get(registration::suggested_price),
        )
        .route("/api/products", post(registration::register_product))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Shared DTOs
// =============================================================================

/// Product DTO (Data Transfer Object) for the views.
///
/// ## Why DTO?
/// - Decouples the domain model from the API contract
/// - Prices cross the wire as decimal values; `Money` stays internal
/// - camelCase rename for JS consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub cost_price: f64,
    pub sale_price: f64,
    pub stock: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            barcode: p.barcode,
            name: p.name,
            cost_price: p.cost_price.as_value(),
            sale_price: p.sale_price.as_value(),
            stock: p.stock,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
