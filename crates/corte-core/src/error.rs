//! # Error Types
//!
//! Domain-specific error types for corte-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  corte-core errors (this file)                                      │
//! │  └── CoreError       - Validation and business rule failures        │
//! │                                                                     │
//! │  corte-db errors (separate crate)                                   │
//! │  ├── DbError         - Database operation failures                  │
//! │  └── EngineError     - CoreError | DbError, what callers see        │
//! │                                                                     │
//! │  Flow: CoreError → EngineError → presentation layer                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, available stock)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::StockMode;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of these are local validation failures: the operator corrects the
/// input and resubmits. None are retried automatically and none are fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Monetary amount is zero or negative.
    ///
    /// ## When This Occurs
    /// - Registering a sale with a non-positive charged amount
    /// - Registering an expense of zero or less
    /// - Appending a ledger entry directly with `amount <= 0`
    #[error("invalid amount: {amount} (must be positive)")]
    InvalidAmount { amount: f64 },

    /// Quantity (kilograms) is zero or negative.
    #[error("invalid quantity: {quantity} (enter a valid amount)")]
    InvalidQuantity { quantity: f64 },

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - Quantity mode only: selling more kilograms than are on hand
    ///
    /// ## User Workflow
    /// ```text
    /// Sell 20kg of Vacio
    ///      │
    ///      ▼
    /// Check stock: available = 7
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Vacio", available: 7.0, requested: 20.0 }
    ///      │
    ///      ▼
    /// UI shows: "Only 7kg of Vacio in stock"
    /// ```
    #[error("insufficient stock for {name}: available {available}kg, requested {requested}kg")]
    InsufficientStock {
        name: String,
        available: f64,
        requested: f64,
    },

    /// Blank product name on restock or catalog add.
    #[error("product name must not be empty")]
    EmptyName,

    /// Operation does not exist in the configured stock mode.
    ///
    /// ## When This Occurs
    /// - Restocking in revenue mode (there is no physical stock to add to;
    ///   the state column holds accumulated money, not kilograms)
    #[error("{operation} is not available in {mode} mode")]
    UnsupportedInMode {
        operation: &'static str,
        mode: StockMode,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_includes_available() {
        let err = CoreError::InsufficientStock {
            name: "Vacio".to_string(),
            available: 7.0,
            requested: 20.0,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for Vacio: available 7kg, requested 20kg"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = CoreError::InvalidAmount { amount: -1.5 };
        assert_eq!(err.to_string(), "invalid amount: -1.5 (must be positive)");

        let err = CoreError::EmptyName;
        assert_eq!(err.to_string(), "product name must not be empty");
    }

    #[test]
    fn test_unsupported_in_mode_message() {
        let err = CoreError::UnsupportedInMode {
            operation: "restock",
            mode: StockMode::Revenue,
        };
        assert_eq!(err.to_string(), "restock is not available in revenue mode");
    }
}
