//! # Pricing Module
//!
//! Margin-based sale-price suggestion for the registration view.
//!
//! ## How The Suggestion Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Registration Form                                                      │
//! │                                                                         │
//! │  Cost price: R$ 10.00      Margin: 30%                                  │
//! │       │                        │                                        │
//! │       └────────┬───────────────┘                                        │
//! │                ▼                                                        │
//! │  suggest_sale_price(cost, margin) ──► R$ 13.00 pre-filled               │
//! │                                                                         │
//! │  The cashier may overwrite the pre-filled value; whatever is submitted  │
//! │  is what gets persisted. The suggestion is a convenience, not a rule.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Margin Rate
// =============================================================================

/// Profit margin represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 3000 bps = 30% (the form's default margin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginRate(u32);

impl MarginRate {
    /// Creates a margin rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        MarginRate(bps)
    }

    /// Creates a margin rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        MarginRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero margin.
    #[inline]
    pub const fn zero() -> Self {
        MarginRate(0)
    }
}

impl Default for MarginRate {
    fn default() -> Self {
        MarginRate::zero()
    }
}

// =============================================================================
// Suggestion
// =============================================================================

/// Suggests a sale price for a given cost and profit margin.
///
/// Computes `cost × (1 + margin)` in integer math, rounding the result to
/// the nearest cent: `(cents × (10000 + bps) + 5000) / 10000`.
///
/// ## Example
/// ```rust
/// use banca_core::money::Money;
/// use banca_core::pricing::{suggest_sale_price, MarginRate};
///
/// let cost = Money::from_cents(1000);            // R$ 10.00
/// let margin = MarginRate::from_percentage(30.0); // 30%
/// assert_eq!(suggest_sale_price(cost, margin).cents(), 1300); // R$ 13.00
/// ```
pub fn suggest_sale_price(cost: Money, margin: MarginRate) -> Money {
    // i128 keeps the intermediate product safe from overflow on large costs
    let cents = (cost.cents() as i128 * (10_000 + margin.bps() as i128) + 5_000) / 10_000;
    Money::from_cents(cents as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_rate_from_bps() {
        let rate = MarginRate::from_bps(3000);
        assert_eq!(rate.bps(), 3000);
        assert!((rate.percentage() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_margin_rate_from_percentage() {
        assert_eq!(MarginRate::from_percentage(30.0).bps(), 3000);
        assert_eq!(MarginRate::from_percentage(7.5).bps(), 750);
    }

    #[test]
    fn test_suggestion_reference_case() {
        // cost=10.00, margin=30% → suggested sale price = 13.00
        let cost = Money::from_cents(1000);
        let suggested = suggest_sale_price(cost, MarginRate::from_percentage(30.0));
        assert_eq!(suggested.cents(), 1300);
    }

    #[test]
    fn test_suggestion_rounds_to_nearest_cent() {
        // 2.99 × 1.075 = 3.21425 → 3.21
        let cost = Money::from_cents(299);
        let suggested = suggest_sale_price(cost, MarginRate::from_percentage(7.5));
        assert_eq!(suggested.cents(), 321);

        // 0.99 × 1.30 = 1.287 → 1.29
        let cost = Money::from_cents(99);
        let suggested = suggest_sale_price(cost, MarginRate::from_percentage(30.0));
        assert_eq!(suggested.cents(), 129);
    }

    #[test]
    fn test_zero_margin_is_identity() {
        let cost = Money::from_cents(1234);
        assert_eq!(suggest_sale_price(cost, MarginRate::zero()), cost);
    }
}
