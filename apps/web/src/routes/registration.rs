//! # Registration View
//!
//! New-product form: barcode, name, cost, margin %, sale price, initial
//! stock.
//!
//! ## Price Suggestion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Registration Form                                                      │
//! │                                                                         │
//! │  Cost: 10.00   Margin: 30%                                              │
//! │       │             │                                                   │
//! │       └──────┬──────┘                                                   │
//! │              ▼                                                          │
//! │  GET /api/registration/suggested-price?cost=10.00&margin=30             │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  {"suggestedPrice": 13.00}  → pre-fills the sale-price field            │
//! │                                                                         │
//! │  Submit persists WHATEVER is in the field: the suggestion is a          │
//! │  convenience, not a stored or enforced relationship.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use banca_core::pricing::{suggest_sale_price, MarginRate};
use banca_core::{validation, Money, NewProduct, DEFAULT_MARGIN_PERCENT};

use crate::error::ApiError;
use crate::routes::ProductDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestedPriceQuery {
    /// Cost price as a decimal value.
    pub cost: f64,
    /// Margin percentage; defaults to the form's standard 30%.
    pub margin: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPriceResponse {
    pub suggested_price: f64,
    pub margin_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProductRequest {
    pub barcode: String,
    pub name: String,
    pub cost_price: f64,
    /// Margin used to compute the fallback sale price. Display-only input:
    /// never persisted.
    pub margin_percent: Option<f64>,
    /// The sale price as submitted. When absent, the margin suggestion is
    /// used (the pre-filled field submitted unchanged).
    pub sale_price: Option<f64>,
    pub stock: i64,
}

/// Computes the pre-fill value for the sale-price field.
pub async fn suggested_price(
    Query(query): Query<SuggestedPriceQuery>,
) -> Result<Json<SuggestedPriceResponse>, ApiError> {
    let cost = Money::from_value(query.cost);
    validation::validate_price("cost", cost)?;

    let margin_percent = query.margin.unwrap_or(DEFAULT_MARGIN_PERCENT);
    validation::validate_margin_percent(margin_percent)?;

    let suggested = suggest_sale_price(cost, MarginRate::from_percentage(margin_percent));

    Ok(Json(SuggestedPriceResponse {
        suggested_price: suggested.as_value(),
        margin_percent,
    }))
}

/// Registers a new product.
///
/// Inserts unconditionally: an already-registered barcode is NOT an error,
/// it simply produces a second catalog row (lookups resolve to the first).
pub async fn register_product(
    State(state): State<AppState>,
    Json(request): Json<RegisterProductRequest>,
) -> Result<Json<ProductDto>, ApiError> {
    let barcode = validation::validate_barcode(&request.barcode)?;
    let name = validation::validate_name(&request.name)?;

    let cost_price = Money::from_value(request.cost_price);
    validation::validate_price("cost_price", cost_price)?;

    let margin_percent = request.margin_percent.unwrap_or(DEFAULT_MARGIN_PERCENT);
    validation::validate_margin_percent(margin_percent)?;

    // Submitted value wins; the suggestion only fills the gap
    let sale_price = match request.sale_price {
        Some(value) => Money::from_value(value),
        None => suggest_sale_price(cost_price, MarginRate::from_percentage(margin_percent)),
    };
    validation::validate_price("sale_price", sale_price)?;

    validation::validate_initial_stock(request.stock)?;

    debug!(barcode = %barcode, name = %name, "Registering product");

    let product = state
        .db
        .products()
        .insert(&NewProduct {
            barcode,
            name,
            cost_price,
            sale_price,
            stock: request.stock,
        })
        .await?;

    info!(
        id = product.id,
        name = %product.name,
        sale_price = %product.sale_price,
        "Product registered"
    );

    Ok(Json(ProductDto::from(product)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use banca_db::{Database, DbConfig};

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, AppConfig::default())
    }

    #[tokio::test]
    async fn test_suggested_price_reference_case() {
        // cost=10.00, margin=30% → 13.00
        let response = suggested_price(Query(SuggestedPriceQuery {
            cost: 10.0,
            margin: Some(30.0),
        }))
        .await
        .unwrap()
        .0;

        assert_eq!(response.suggested_price, 13.0);
        assert_eq!(response.margin_percent, 30.0);
    }

    #[tokio::test]
    async fn test_suggested_price_defaults_to_standard_margin() {
        let response = suggested_price(Query(SuggestedPriceQuery {
            cost: 10.0,
            margin: None,
        }))
        .await
        .unwrap()
        .0;

        assert_eq!(response.margin_percent, 30.0);
        assert_eq!(response.suggested_price, 13.0);
    }

    #[tokio::test]
    async fn test_submitted_sale_price_overrides_suggestion() {
        let state = state().await;

        let product = register_product(
            State(state.clone()),
            Json(RegisterProductRequest {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: 10.0,
                margin_percent: Some(30.0),
                sale_price: Some(14.5), // cashier overwrote the 13.00 pre-fill
                stock: 24,
            }),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(product.sale_price, 14.5);
    }

    #[tokio::test]
    async fn test_omitted_sale_price_falls_back_to_suggestion() {
        let state = state().await;

        let product = register_product(
            State(state.clone()),
            Json(RegisterProductRequest {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: 10.0,
                margin_percent: Some(30.0),
                sale_price: None,
                stock: 24,
            }),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(product.sale_price, 13.0);
    }

    #[tokio::test]
    async fn test_registration_round_trips_through_lookup() {
        let state = state().await;

        let registered = register_product(
            State(state.clone()),
            Json(RegisterProductRequest {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: 0.8,
                margin_percent: None,
                sale_price: Some(2.5),
                stock: 24,
            }),
        )
        .await
        .unwrap()
        .0;

        let found = state
            .db
            .products()
            .find_by_barcode("7891000100103")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, registered.id);
        assert_eq!(found.name, "Água 500ml");
        assert_eq!(found.cost_price.as_value(), 0.8);
        assert_eq!(found.sale_price.as_value(), 2.5);
        assert_eq!(found.stock, 24);
    }

    #[tokio::test]
    async fn test_registration_validates_before_writing() {
        let state = state().await;

        let err = register_product(
            State(state.clone()),
            Json(RegisterProductRequest {
                barcode: "".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: 0.8,
                margin_percent: None,
                sale_price: Some(2.5),
                stock: 24,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(state.db.products().count().await.unwrap(), 0);
    }
}
