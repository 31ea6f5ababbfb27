//! # Validation Module
//!
//! Input validation run before any write.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web handler (deserialization)                                 │
//! │  └── Type validation: wrong shapes never reach the domain               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Required fields, sign checks, length caps                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  └── NOT NULL constraints                                               │
//! │                                                                         │
//! │  A failure at layers 1-2 means the store was never touched.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 64 characters
///
/// Barcodes arrive as raw text from a scanner or keyboard; no digit-only or
/// checksum rule is applied, and uniqueness is NOT checked here or anywhere.
///
/// ## Returns
/// The trimmed barcode.
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        });
    }

    Ok(barcode.to_string())
}

/// Validates a product or manual-sale name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a manual sale value.
///
/// ## Rules
/// - Must be positive (> 0): a zero or negative manual sale is rejected
///   before any write
pub fn validate_sale_value(value: Money) -> ValidationResult<()> {
    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "value".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price (cost or sale).
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (giveaways, unpriced cost)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an initial stock level.
///
/// ## Rules
/// - Must be non-negative: stock only goes negative through sales, never
///   through registration
pub fn validate_initial_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a margin percentage for the price suggestion.
///
/// ## Rules
/// - Must be finite and between 0% and 1000%
pub fn validate_margin_percent(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || pct < 0.0 || pct > 1000.0 {
        return Err(ValidationError::OutOfRange {
            field: "margin".to_string(),
            min: 0,
            max: 1000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode("7891000100103").unwrap(), "7891000100103");
        assert_eq!(validate_barcode("  abc-123  ").unwrap(), "abc-123");

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Água 500ml").unwrap(), "Água 500ml");
        assert_eq!(validate_name("  Chiclete  ").unwrap(), "Chiclete");

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_sale_value() {
        assert!(validate_sale_value(Money::from_cents(1)).is_ok());
        assert!(validate_sale_value(Money::from_cents(350)).is_ok());

        assert!(validate_sale_value(Money::zero()).is_err());
        assert!(validate_sale_value(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("cost_price", Money::zero()).is_ok());
        assert!(validate_price("sale_price", Money::from_cents(1099)).is_ok());
        assert!(validate_price("sale_price", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_initial_stock() {
        assert!(validate_initial_stock(0).is_ok());
        assert!(validate_initial_stock(50).is_ok());
        assert!(validate_initial_stock(-1).is_err());
    }

    #[test]
    fn test_validate_margin_percent() {
        assert!(validate_margin_percent(0.0).is_ok());
        assert!(validate_margin_percent(30.0).is_ok());
        assert!(validate_margin_percent(-5.0).is_err());
        assert!(validate_margin_percent(f64::NAN).is_err());
        assert!(validate_margin_percent(5000.0).is_err());
    }
}
