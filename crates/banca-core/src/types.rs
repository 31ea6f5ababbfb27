//! # Domain Types
//!
//! Core domain types used throughout Banca POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │   SaleRecord    │   │    SaleKind     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (rowid)     │   │  id (rowid)     │   │  Code           │        │
//! │  │  barcode        │   │  recorded_at    │   │  Manual         │        │
//! │  │  name           │   │  product_name   │   └─────────────────┘        │
//! │  │  cost_price     │   │  value          │                              │
//! │  │  sale_price     │   │  kind           │   ┌─────────────────┐        │
//! │  │  stock          │   └─────────────────┘   │   DailyReport   │        │
//! │  └─────────────────┘                         │  date,total,rows│        │
//! │                                              └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are plain integers assigned by the store on insert (SQLite rowids).
//! Barcodes are intended-unique external identifiers, but uniqueness is NOT
//! enforced: duplicate registrations are permitted and lookups resolve to
//! the first-inserted match.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Timestamp shape persisted for sale records: local clock, second precision.
///
/// The daily revenue filter is a string-prefix match on this format, so the
/// shape is part of the storage contract, not a display choice.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the store on insert.
    pub id: i64,

    /// Barcode as scanned (raw text, intended-unique, not enforced).
    pub barcode: String,

    /// Display name shown on the sales and inventory views.
    pub name: String,

    /// Acquisition cost (feeds the margin suggestion).
    pub cost_price: Money,

    /// Price charged on a barcode sale.
    pub sale_price: Money,

    /// Current stock level. May go negative: sales never check a floor.
    pub stock: i64,
}

impl Product {
    /// Whether the inventory view should flag this product.
    ///
    /// Advisory only: a low or negative stock level never blocks a sale.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }
}

/// A product registration, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub cost_price: Money,
    pub sale_price: Money,
    pub stock: i64,
}

// =============================================================================
// Sale Kind
// =============================================================================

/// How a sale was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Resolved through catalog lookup; decrements the product's stock.
    Code,
    /// Ad-hoc entry with no catalog linkage; never touches stock.
    Manual,
}

impl SaleKind {
    /// Storage/display spelling, matching the persisted TEXT column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleKind::Code => "code",
            SaleKind::Manual => "manual",
        }
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One row of sales history.
/// Uses snapshot pattern: `product_name` freezes the name at sale time, so
/// history survives later product edits. Records are immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unique identifier, assigned by the store on insert.
    pub id: i64,

    /// When the sale was recorded (local clock, second precision).
    pub recorded_at: NaiveDateTime,

    /// Product name at sale time (snapshot, not a foreign key).
    pub product_name: String,

    /// The price actually charged.
    pub value: Money,

    /// Whether the sale came from a barcode lookup or manual entry.
    pub kind: SaleKind,
}

impl SaleRecord {
    /// Renders the timestamp in the persisted shape.
    pub fn timestamp(&self) -> String {
        self.recorded_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

// =============================================================================
// Daily Report
// =============================================================================

/// Aggregated revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// The calendar day the report covers.
    pub date: chrono::NaiveDate,

    /// Sum of `value` over the matching records; zero for an empty day.
    pub total: Money,

    /// Matching records in insertion order.
    pub records: Vec<SaleRecord>,
}

// =============================================================================
// Unit Tests
// =============================================================================
