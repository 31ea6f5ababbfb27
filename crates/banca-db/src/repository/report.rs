//! # Report Repository
//!
//! Database operations for the revenue and inventory reports.
//!
//! ## Daily Revenue Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How the Day Filter Works                             │
//! │                                                                         │
//! │  Revenue view asks for 2026-08-06                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE timestamp LIKE ?1    with ?1 = '2026-08-06%'                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ 2026-08-06 09:12:40 | Água    |  2.50   │ ← MATCH                    │
//! │  │ 2026-08-06 14:30:05 | Revista | 12.00   │ ← MATCH                    │
//! │  │ 2026-08-05 18:01:11 | Água    |  2.50   │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = 14.50, rows in insertion order                                 │
//! │                                                                         │
//! │  The '%' travels inside the bound parameter, never in the SQL text.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRow;
use banca_core::{DailyReport, Money, Product, SaleKind, SaleRecord, TIMESTAMP_FORMAT};

/// Database row shape for `sales_history`.
#[derive(Debug, sqlx::FromRow)]
struct SaleRecordRow {
    id: i64,
    timestamp: String,
    product_name: String,
    value: f64,
    kind: SaleKind,
}

impl TryFrom<SaleRecordRow> for SaleRecord {
    type Error = DbError;

    fn try_from(row: SaleRecordRow) -> Result<Self, Self::Error> {
        let recorded_at = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| {
                DbError::Internal(format!("Malformed timestamp '{}': {}", row.timestamp, e))
            })?;

        Ok(SaleRecord {
            id: row.id,
            recorded_at,
            product_name: row.product_name,
            value: Money::from_value(row.value),
            kind: row.kind,
        })
    }
}

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Builds the revenue report for one calendar day.
    ///
    /// Matches every record whose timestamp text starts with the day's
    /// `YYYY-MM-DD`, in insertion order, and sums `value` over them.
    /// An empty day yields a zero total and no rows.
    pub async fn daily_total(&self, date: NaiveDate) -> DbResult<DailyReport> {
        let day_prefix = format!("{}%", date.format("%Y-%m-%d"));

        debug!(date = %date, "Building daily revenue report");

        // SUM over zero rows is NULL, decoded as None
        let total: Option<f64> =
            sqlx::query_scalar("SELECT SUM(value) FROM sales_history WHERE timestamp LIKE ?1")
                .bind(&day_prefix)
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, SaleRecordRow>(
            r#"
            SELECT id, timestamp, product_name, value, kind
            FROM sales_history
            WHERE timestamp LIKE ?1
            ORDER BY id
            "#,
        )
        .bind(&day_prefix)
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .into_iter()
            .map(SaleRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DailyReport {
            date,
            total: Money::from_value(total.unwrap_or(0.0)),
            records,
        })
    }

    /// Lists products whose stock is below the threshold.
    ///
    /// Advisory: feeds the inventory view's warning banner and never blocks
    /// a sale. Negative stock levels sort first.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, barcode, name, cost_price, sale_price, stock
            FROM products
            WHERE stock < ?1
            ORDER BY stock, name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use banca_core::{Money, NewProduct, SaleKind};
    use chrono::{Duration, Local, NaiveDate};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Inserts a history row with an explicit timestamp, bypassing the
    /// recorder's "now" stamping so tests can target specific days.
    async fn insert_at(db: &Database, timestamp: &str, name: &str, value: f64) {
        sqlx::query(
            "INSERT INTO sales_history (timestamp, product_name, value, kind) \
             VALUES (?1, ?2, ?3, 'manual')",
        )
        .bind(timestamp)
        .bind(name)
        .bind(value)
        .execute(db.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_daily_total_sums_only_the_requested_day() {
        let db = db().await;

        insert_at(&db, "2026-08-06 09:12:40", "Água 500ml", 2.5).await;
        insert_at(&db, "2026-08-06 14:30:05", "Revista", 12.0).await;
        insert_at(&db, "2026-08-05 18:01:11", "Água 500ml", 2.5).await;

        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let report = db.reports().daily_total(date).await.unwrap();

        assert_eq!(report.total, Money::from_cents(1450));
        assert_eq!(report.records.len(), 2);

        // Insertion order preserved
        assert_eq!(report.records[0].product_name, "Água 500ml");
        assert_eq!(report.records[1].product_name, "Revista");
        assert_eq!(report.records[1].value, Money::from_cents(1200));
    }

    #[tokio::test]
    async fn test_daily_total_empty_day_is_zero() {
        let db = db().await;

        insert_at(&db, "2026-08-05 18:01:11", "Água 500ml", 2.5).await;

        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let report = db.reports().daily_total(date).await.unwrap();

        assert!(report.total.is_zero());
        assert!(report.records.is_empty());
    }

    #[tokio::test]
    async fn test_recorded_sales_land_in_todays_report() {
        let db = db().await;

        let product = db
            .products()
            .insert(&NewProduct {
                barcode: "7891000100103".to_string(),
                name: "Água 500ml".to_string(),
                cost_price: Money::from_cents(80),
                sale_price: Money::from_cents(250),
                stock: 10,
            })
            .await
            .unwrap();

        db.sales()
            .record_sale(&product.name, product.sale_price, SaleKind::Code, Some(product.id))
            .await
            .unwrap();
        db.sales()
            .record_sale("Avulso", Money::from_cents(500), SaleKind::Manual, None)
            .await
            .unwrap();

        let today = Local::now().date_naive();
        let report = db.reports().daily_total(today).await.unwrap();

        assert_eq!(report.total, Money::from_cents(750));
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].kind, SaleKind::Code);
        assert_eq!(report.records[1].kind, SaleKind::Manual);

        // Yesterday stays empty
        let yesterday = today - Duration::days(1);
        let empty = db.reports().daily_total(yesterday).await.unwrap();
        assert!(empty.total.is_zero());
        assert!(empty.records.is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_filters_below_threshold() {
        let db = db().await;

        for (name, stock) in [("Água 500ml", 24), ("Chiclete", 4), ("Isqueiro", 0)] {
            db.products()
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

        let low = db.reports().low_stock(5).await.unwrap();
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();

        // Sorted by stock ascending; the healthy product is absent
        assert_eq!(names, vec!["Isqueiro", "Chiclete"]);
    }
}
