//! # Validation Module
//!
//! Input validation for the three operator-facing operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Presentation (external caller)                            │
//! │  ├── Widget-level format checks only                                │
//! │  └── Performs NO business validation                                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (enforced identically for every caller)       │
//! │  ├── Positive amounts and quantities                                │
//! │  └── Non-empty product names                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── CHECK (amount > 0) on the ledger                               │
//! │  └── Composite primary key on (branch, name)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};

/// Validates a monetary amount.
///
/// ## Rules
/// - Must be strictly positive
/// - NaN is rejected (the comparison is written so NaN fails)
///
/// ## Example
/// ```rust
/// use corte_core::validation::validate_amount;
///
/// assert!(validate_amount(4500.0).is_ok());
/// assert!(validate_amount(0.0).is_err());
/// assert!(validate_amount(-10.0).is_err());
/// ```
pub fn validate_amount(amount: f64) -> CoreResult<()> {
    if !(amount > 0.0) {
        return Err(CoreError::InvalidAmount { amount });
    }
    Ok(())
}

/// Validates a quantity in kilograms.
///
/// ## Rules
/// - Must be strictly positive (fractional kilograms are fine)
pub fn validate_quantity(quantity: f64) -> CoreResult<()> {
    if !(quantity > 0.0) {
        return Err(CoreError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Validates a raw product name before canonicalization.
///
/// ## Rules
/// - Must not be empty or whitespace-only
pub fn validate_product_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::EmptyName);
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
    fn test_validate_amount() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(4500.0).is_ok());

        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-1200.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0.1).is_ok());
        assert!(validate_quantity(3.0).is_ok());

        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-3.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Vacio").is_ok());
        assert!(validate_product_name("  vacio  ").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }
}
