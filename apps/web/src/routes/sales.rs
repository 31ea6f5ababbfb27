//! # Sales View
//!
//! The point-of-sale workflow: barcode lookup + confirm, or manual entry.
//!
//! ## Barcode Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sales Screen                                                           │
//! │                                                                         │
//! │  Scanner "types" the code ──► GET /api/sales/lookup?barcode=...         │
//! │       │                                                                 │
//! │       ├── 404: "not found" warning, nothing written                     │
//! │       │                                                                 │
//! │       └── 200: item + price shown ──► cashier confirms                  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │            POST /api/sales/barcode {productId}                          │
//! │                    │                                                    │
//! │                    ├── stock - 1 on the product                         │
//! │                    └── history row (kind=code, current sale_price)      │
//! │                                                                         │
//! │  Manual flow: POST /api/sales/manual {name, value}                      │
//! │  → validated before any write, then history row (kind=manual),         │
//! │    no stock anywhere is touched.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use banca_core::{validation, CoreError, Money, SaleKind};

use crate::error::ApiError;
use crate::routes::ProductDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub barcode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeSaleRequest {
    pub product_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualSaleRequest {
    pub name: String,
    /// Decimal value actually charged; must be positive.
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecordedResponse {
    pub sale_id: i64,
    pub product_name: String,
    pub value: f64,
    pub kind: SaleKind,
    pub recorded_at: String,
}

/// Looks up a product by barcode for the sales screen.
///
/// A miss is a warning, not a failure of the system: 404 with a message,
/// and no write is attempted.
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<ProductDto>, ApiError> {
    let barcode = validation::validate_barcode(&query.barcode)?;

    debug!(barcode = %barcode, "Sales lookup");

    let product = state
        .db
        .products()
        .find_by_barcode(&barcode)
        .await?
        .ok_or(CoreError::ProductNotFound(barcode))?;

    Ok(Json(ProductDto::from(product)))
}

/// Confirms a barcode sale.
///
/// Charges the product's CURRENT sale price and name (the lookup shown to
/// the cashier and the confirm read the same store, so they agree unless
/// the catalog changed in between).
pub async fn record_barcode_sale(
    State(state): State<AppState>,
    Json(request): Json<BarcodeSaleRequest>,
) -> Result<Json<SaleRecordedResponse>, ApiError> {
    debug!(product_id = request.product_id, "Barcode sale confirm");

    let product = state.db.products().require_by_id(request.product_id).await?;

    let record = state
        .db
        .sales()
        .record_sale(
            &product.name,
            product.sale_price,
            SaleKind::Code,
            Some(product.id),
        )
        .await?;

    let recorded_at = record.timestamp();
    Ok(Json(SaleRecordedResponse {
        sale_id: record.id,
        product_name: record.product_name,
        value: record.value.as_value(),
        kind: record.kind,
        recorded_at,
    }))
}

/// Confirms a manual sale (no catalog linkage).
///
/// Validation runs before any write: an empty name or a non-positive value
/// is rejected with no state change.
pub async fn record_manual_sale(
    State(state): State<AppState>,
    Json(request): Json<ManualSaleRequest>,
) -> Result<Json<SaleRecordedResponse>, ApiError> {
    let name = validation::validate_name(&request.name)?;
    let value = Money::from_value(request.value);
    validation::validate_sale_value(value)?;

    debug!(name = %name, value = %value, "Manual sale confirm");

    let record = state
        .db
        .sales()
        .record_sale(&name, value, SaleKind::Manual, None)
        .await?;

    let recorded_at = record.timestamp();
    Ok(Json(SaleRecordedResponse {
        sale_id: record.id,
        product_name: record.product_name,
        value: record.value.as_value(),
        kind: record.kind,
        recorded_at,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use banca_core::NewProduct;
    use banca_db::{Database, DbConfig};

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, AppConfig::default())
    }

    #[tokio::test]
    async fn test_lookup_miss_is_a_404_warning() {
        let state = state().await;

        let err = lookup(
            State(state),
            Query(LookupQuery {
                barcode: "0000000000000".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_barcode_sale_decrements_and_records() {
        let state = state().await;
        let product = state
            .db
            .products()
            .insert(&NewProduct {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: Money::from_cents(80),
                sale_price: Money::from_cents(250),
                stock: 3,
            })
            .await
            .unwrap();

        let response = record_barcode_sale(
            State(state.clone()),
            Json(BarcodeSaleRequest {
                product_id: product.id,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.kind, SaleKind::Code);
        assert_eq!(response.0.value, 2.5);
        assert_eq!(response.0.product_name, "Água 500ml");

        let after = state.db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 2);
    }

    #[tokio::test]
    async fn test_manual_sale_rejects_bad_input_before_writing() {
        let state = state().await;

        let empty_name = record_manual_sale(
            State(state.clone()),
            Json(ManualSaleRequest {
                name: "   ".to_string(),
                value: 5.0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(empty_name.code, crate::error::ErrorCode::ValidationError);

        let bad_value = record_manual_sale(
            State(state.clone()),
            Json(ManualSaleRequest {
                name: "Guarda-chuva".to_string(),
                value: 0.0,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(bad_value.code, crate::error::ErrorCode::ValidationError);

        // Nothing was written
        assert_eq!(state.db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_manual_sale_records_without_touching_stock() {
        let state = state().await;
        let product = state
            .db
            .products()
            .insert(&NewProduct {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: Money::from_cents(80),
                sale_price: Money::from_cents(250),
                stock: 3,
            })
            .await
            .unwrap();

        let response = record_manual_sale(
            State(state.clone()),
            Json(ManualSaleRequest {
                name: "Guarda-chuva".to_string(),
                value: 15.0,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.kind, SaleKind::Manual);

        let after = state.db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 3);
    }
}
