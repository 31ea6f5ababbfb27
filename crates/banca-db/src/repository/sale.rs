//! # Sale Repository
//!
//! The sales recorder: applies one confirmed sale to the store.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Recording a Sale                                  │
//! │                                                                         │
//! │  Barcode sale (kind = code, product_id = Some)                          │
//! │     ├── UPDATE products SET stock = stock - 1 WHERE id = ?              │
//! │     │   (unconditional delta: no floor check, stock may go negative)    │
//! │     └── INSERT INTO sales_history (timestamp, name, value, 'code')      │
//! │                                                                         │
//! │  Manual sale (kind = manual, product_id = None)                         │
//! │     └── INSERT INTO sales_history (timestamp, name, value, 'manual')    │
//! │         (stock is never touched)                                        │
//! │                                                                         │
//! │  The two writes run sequentially on the shared pool WITHOUT an          │
//! │  enclosing transaction: if the history insert fails after the           │
//! │  decrement committed, the writes stay inconsistent. Known gap in the    │
//! │  source design, preserved as-is.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, Timelike};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use banca_core::{Money, SaleKind, SaleRecord, TIMESTAMP_FORMAT};

/// Repository for sale recording.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records one confirmed sale.
    ///
    /// ## Arguments
    /// * `product_name` - Name snapshot for the history row. Callers validate
    ///   non-emptiness before calling; this function does not re-check.
    /// * `value` - The price actually charged.
    /// * `kind` - `Code` for catalog sales, `Manual` for ad-hoc entries.
    /// * `product_id` - When present, that product's stock is decremented by
    ///   exactly 1. An id that matches no row is a silent no-op (the history
    ///   row is still appended), mirroring plain UPDATE semantics.
    ///
    /// ## Returns
    /// The appended [`SaleRecord`] with its store-assigned id and the local
    /// second-precision timestamp it was stamped with.
    pub async fn record_sale(
        &self,
        product_name: &str,
        value: Money,
        kind: SaleKind,
        product_id: Option<i64>,
    ) -> DbResult<SaleRecord> {
        debug!(
            product_name = %product_name,
            value = %value,
            kind = kind.as_str(),
            product_id = ?product_id,
            "Recording sale"
        );

        // Local clock, truncated to whole seconds so the returned record
        // equals what a re-read of the stored text would parse
        let now = Local::now().naive_local();
        let recorded_at = now.with_nanosecond(0).unwrap_or(now);
        let timestamp = recorded_at.format(TIMESTAMP_FORMAT).to_string();

        if let Some(id) = product_id {
            // Delta update, not an absolute write: two terminals decrementing
            // the same product would still converge
            let result = sqlx::query("UPDATE products SET stock = stock - 1 WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                debug!(product_id = id, "Stock decrement matched no product");
            }
        }

        let result = sqlx::query(
            r#"
            INSERT INTO sales_history (timestamp, product_name, value, kind)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&timestamp)
        .bind(product_name)
        .bind(value.as_value())
        .bind(kind)
        .execute(&self.pool)
        .await?;

        let record = SaleRecord {
            id: result.last_insert_rowid(),
            recorded_at,
            product_name: product_name.to_string(),
            value,
            kind,
        };

        info!(
            sale_id = record.id,
            product_name = %record.product_name,
            value = %record.value,
            kind = record.kind.as_str(),
            "Sale recorded"
        );

        Ok(record)
    }

    /// Counts history rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use banca_core::{Money, NewProduct, SaleKind, TIMESTAMP_FORMAT};

    async fn seeded_db() -> (Database, banca_core::Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
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
        (db, product)
    }

    #[tokio::test]
    async fn test_code_sale_decrements_stock_and_appends_record() {
        let (db, product) = seeded_db().await;

        let record = db
            .sales()
            .record_sale(&product.name, product.sale_price, SaleKind::Code, Some(product.id))
            .await
            .unwrap();

        assert!(record.id > 0);
        assert_eq!(record.kind, SaleKind::Code);
        assert_eq!(record.value, product.sale_price);
        assert_eq!(record.product_name, product.name);

        // stock 3 → 2, exactly one history row
        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 2);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_manual_sale_never_touches_stock() {
        let (db, product) = seeded_db().await;

        db.sales()
            .record_sale("Guarda-chuva", Money::from_cents(1500), SaleKind::Manual, None)
            .await
            .unwrap();

        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 3);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stock_may_go_negative() {
        let (db, product) = seeded_db().await;

        for _ in 0..5 {
            db.sales()
                .record_sale(&product.name, product.sale_price, SaleKind::Code, Some(product.id))
                .await
                .unwrap();
        }

        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, -2);
        assert_eq!(db.sales().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_missing_product_id_still_appends_history() {
        let (db, _product) = seeded_db().await;

        let record = db
            .sales()
            .record_sale("Fantasma", Money::from_cents(100), SaleKind::Code, Some(9999))
            .await
            .unwrap();

        assert!(record.id > 0);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_timestamp_matches_persisted_format() {
        let (db, product) = seeded_db().await;

        let record = db
            .sales()
            .record_sale(&product.name, product.sale_price, SaleKind::Code, Some(product.id))
            .await
            .unwrap();

        let rendered = record.timestamp();
        let parsed =
            chrono::NaiveDateTime::parse_from_str(&rendered, TIMESTAMP_FORMAT).unwrap();
        assert_eq!(parsed, record.recorded_at);
    }
}
