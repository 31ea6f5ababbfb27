//! # banca-core: Pure Business Logic for Banca POS
//!
//! This crate is the **heart** of Banca POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Banca POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web views (apps/web)                           │   │
//! │  │    Sales ──► Inventory ──► Revenue ──► Registration             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ banca-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │ MarginRate│  │   rules   │   │   │
//! │  │   │SaleRecord │  │           │  │ suggestion│  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    banca-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SaleRecord, DailyReport)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Margin-based sale-price suggestion
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation run before any write
//!
//! ## Example Usage
//!
//! ```rust
//! use banca_core::money::Money;
//! use banca_core::pricing::{suggest_sale_price, MarginRate};
//!
//! // Create money from cents (never from floats!)
//! let cost = Money::from_cents(1000); // R$ 10.00
//!
//! // Suggested sale price at a 30% margin
//! let margin = MarginRate::from_percentage(30.0);
//! assert_eq!(suggest_sale_price(cost, margin).cents(), 1300); // R$ 13.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use banca_core::Money` instead of
// `use banca_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::MarginRate;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product is flagged on the inventory view.
///
/// Advisory only: a low (or negative) stock level never blocks a sale.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Default profit margin pre-filled on the registration form, in percent.
pub const DEFAULT_MARGIN_PERCENT: f64 = 30.0;
