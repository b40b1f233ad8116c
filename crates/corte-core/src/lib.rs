//! # corte-core: Pure Business Logic for Corte POS
//!
//! This crate is the **heart** of Corte POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Corte POS Architecture                        │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │              Presentation (external caller)                 │    │
//! │  │     dashboards ──► selection menus ──► export buttons       │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                ★ corte-core (THIS CRATE) ★                  │    │
//! │  │                                                             │    │
//! │  │  ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐    │    │
//! │  │  │   types   │ │ reconcile │ │ validation│ │  report   │    │    │
//! │  │  │ StockLine │ │ canonical │ │   rules   │ │  closing  │    │    │
//! │  │  │  Ledger   │ │similarity │ │  checks   │ │  summary  │    │    │
//! │  │  └───────────┘ └───────────┘ └───────────┘ └───────────┘    │    │
//! │  │                                                             │    │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                 corte-db (Database Layer)                   │    │
//! │  │     SQLite stores, migrations, transaction coordinator      │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StockLine, LedgerEntry, CashTotals, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`reconcile`] - Product name canonicalization and fuzzy matching
//! - [`report`] - Plain-text closing report rendering
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output. The reconciler takes an explicit snapshot of catalog
//!    names instead of reading hidden state.
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod reconcile;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use corte_core::StockLine` instead of
// `use corte_core::types::StockLine`

pub use error::{CoreError, CoreResult};
pub use reconcile::NameReconciler;
pub use types::{
    CashTotals, EntryKind, LedgerEntry, RestockReceipt, SaleReceipt, StockLine, StockMode,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default acceptance threshold for name reconciliation (0–1 scale).
///
/// ## Why a constant?
/// Inherited from the deployed configuration with no principled
/// derivation; kept as an overridable default rather than guessing one.
/// See [`reconcile::NameReconciler::new`] to override per deployment.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Default low-stock warning threshold in kilograms (quantity mode).
///
/// ## Why a constant?
/// Same story as the similarity threshold: a deployed magic number,
/// surfaced as a configurable default.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 5.0;
