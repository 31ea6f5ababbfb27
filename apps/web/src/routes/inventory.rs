//! # Inventory View
//!
//! Read-only catalog table with a low-stock flag per row. The flag is
//! advisory: it feeds a warning banner and never blocks a sale.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRowDto {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub cost_price: f64,
    pub sale_price: f64,
    pub stock: i64,
    /// True when stock is below the configured threshold.
    pub low_stock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub products: Vec<InventoryRowDto>,
    /// Number of flagged rows, for the warning banner.
    pub low_stock_count: usize,
    pub low_stock_threshold: i64,
}

/// Renders the inventory table from current store state.
pub async fn inventory(State(state): State<AppState>) -> Result<Json<InventoryResponse>, ApiError> {
    let threshold = state.config.low_stock_threshold;
    let products = state.db.products().list_all().await?;
    // Banner count comes from the reporting query; the per-row flag uses the
    // same threshold, so the two always agree
    let flagged = state.db.reports().low_stock(threshold).await?;

    let rows: Vec<InventoryRowDto> = products
        .into_iter()
        .map(|p| {
            let low_stock = p.is_low_stock(threshold);
            InventoryRowDto {
                id: p.id,
                barcode: p.barcode,
                name: p.name,
                cost_price: p.cost_price.as_value(),
                sale_price: p.sale_price.as_value(),
                stock: p.stock,
                low_stock,
            }
        })
        .collect();

    Ok(Json(InventoryResponse {
        products: rows,
        low_stock_count: flagged.len(),
        low_stock_threshold: threshold,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use banca_core::{Money, NewProduct};
    use banca_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_inventory_flags_low_stock_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = AppState::new(db, AppConfig::default());

        for (name, stock) in [("Água 500ml", 24), ("Chiclete", 2)] {
            state
                .db
                .products()
                .insert(&NewProduct {
                    barcode: format!("789{stock:010}"),
                    name: name.to_string(),
                    cost_price: Money::from_cents(50),
                    sale_price: Money::from_cents(100),
                    stock,
                })
                .await
                .unwrap();
        }

        let response = inventory(State(state)).await.unwrap().0;

        assert_eq!(response.products.len(), 2);
        assert_eq!(response.low_stock_count, 1);
        assert_eq!(response.low_stock_threshold, 5);

        let chiclete = response
            .products
            .iter()
            .find(|r| r.name == "Chiclete")
            .unwrap();
        assert!(chiclete.low_stock);

        let agua = response
            .products
            .iter()
            .find(|r| r.name == "Água 500ml")
            .unwrap();
        assert!(!agua.low_stock);
    }
}
