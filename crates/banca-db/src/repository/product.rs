//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Barcode Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Barcode Lookup Works                             │
//! │                                                                         │
//! │  Scanner types: "7891000100103"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE barcode = ?1 ORDER BY id LIMIT 1                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ id=3 | 7891000100103 | Água 500ml       │ ← first-inserted MATCH     │
//! │  │ id=9 | 7891000100103 | Água 500ml (re)  │   (duplicates permitted)   │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some(Product) or None ("not found" warning in the sales view)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Registration never checks for an existing barcode, so duplicates can
//! accumulate (e.g. re-supplying the same item as a new row). Lookups pick
//! the first-inserted match to keep the behavior deterministic.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use banca_core::{Money, NewProduct, Product};

/// Database row shape for `products`.
///
/// Prices live in REAL columns, so the row carries them as `f64`; the
/// conversion into the integer-cents [`Money`] domain happens exactly once,
/// in the `From` impl below.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: i64,
    barcode: String,
    name: String,
    cost_price: f64,
    sale_price: f64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            barcode: row.barcode,
            name: row.name,
            cost_price: Money::from_value(row.cost_price),
            sale_price: Money::from_value(row.sale_price),
            stock: row.stock,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, barcode, name, cost_price, sale_price, stock";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // Lookup by barcode (sales view)
/// let product = repo.find_by_barcode("7891000100103").await?;
///
/// // Register (registration view)
/// let product = repo.insert(&new_product).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product; the store assigns the id.
    ///
    /// No barcode uniqueness check: registering the same barcode twice
    /// yields two catalog rows, both valid.
    ///
    /// ## Returns
    /// The registered product with its store-assigned id.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(barcode = %new.barcode, name = %new.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (barcode, name, cost_price, sale_price, stock)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new.barcode)
        .bind(&new.name)
        .bind(new.cost_price.as_value())
        .bind(new.sale_price.as_value())
        .bind(new.stock)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            barcode: new.barcode.clone(),
            name: new.name.clone(),
            cost_price: new.cost_price,
            sale_price: new.sale_price,
            stock: new.stock,
        })
    }

    /// Looks up a product by barcode.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - First-inserted match for the barcode
    /// * `Ok(None)` - No product registered under this barcode
    pub async fn find_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        debug!(barcode = %barcode, "Looking up product by barcode");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1 ORDER BY id LIMIT 1"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Gets a product by id, erroring when absent.
    ///
    /// For call sites that hold an id from a prior lookup (the sale-confirm
    /// flow) and treat absence as a failure.
    pub async fn require_by_id(&self, id: i64) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Lists the whole catalog for the inventory view, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts catalog rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
