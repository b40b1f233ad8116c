//! # Domain Types
//!
//! Core domain types used throughout Corte POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │   StockLine     │   │   LedgerEntry   │   │   CashTotals    │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  branch         │   │  id (rowid)     │   │  income         │    │
//! │  │  name (key)     │   │  kind           │   │  expense        │    │
//! │  │  state          │   │  amount, memo   │   │  balance()      │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘    │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                          │
//! │  │   StockMode     │   │   EntryKind     │                          │
//! │  │  ─────────────  │   │  ─────────────  │                          │
//! │  │  Quantity (kg)  │   │  Income         │                          │
//! │  │  Revenue ($)    │   │  Expense        │                          │
//! │  └─────────────────┘   └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is partitioned by branch: a `StockLine` or `LedgerEntry` is
//! never shared across branches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Stock Mode
// =============================================================================

/// What a product's numeric state means for a given deployment.
///
/// ## Why a Mode?
/// Two observed deployments diverge only in the semantics of the `state`
/// column: kilograms on hand (decremented by sales, replenished by
/// restocks) vs. accumulated revenue (incremented by sales, no restock).
/// One store polymorphic over the mode replaces two parallel engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMode {
    /// `state` is kilograms on hand; sales subtract, restocks add,
    /// and `state >= 0` is an invariant.
    Quantity,
    /// `state` is cumulative money collected for the product since the
    /// last reset; sales add the charged amount.
    Revenue,
}

impl Default for StockMode {
    fn default() -> Self {
        StockMode::Quantity
    }
}

impl std::fmt::Display for StockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockMode::Quantity => write!(f, "quantity"),
            StockMode::Revenue => write!(f, "revenue"),
        }
    }
}

// =============================================================================
// Entry Kind
// =============================================================================

/// Direction of a cash movement.
///
/// Direction is carried here, never by the sign of the amount: ledger
/// amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money coming in (sales).
    Income,
    /// Money going out (operating expenses).
    Expense,
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One immutable cash movement.
///
/// Entries are append-only: there is no update or reordering operation
/// anywhere in the engine. Corrections are modeled as new offsetting
/// entries by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    /// Unique identifier, assigned at insertion. Strictly increasing in
    /// call order within a branch, which defines chronological order.
    pub id: i64,

    /// Owning branch.
    pub branch: String,

    /// Income or expense.
    pub kind: EntryKind,

    /// Amount moved. Always positive; see [`EntryKind`].
    pub amount: f64,

    /// Free-text description. Auto-generated for sales
    /// (`"Sale 3kg Vacio"`), operator-supplied for expenses.
    pub memo: String,

    /// Creation time, minute resolution.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Signed contribution of this entry to the cash balance.
    #[inline]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

// =============================================================================
// Stock Line
// =============================================================================

/// One product row within a branch, keyed by `(branch, name)`.
///
/// `name` is the canonical form (trimmed, first letter capitalized); see
/// [`crate::reconcile::canonicalize_name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockLine {
    /// Owning branch.
    pub branch: String,

    /// Canonical product name (storage key within the branch).
    pub name: String,

    /// Kilograms on hand or accumulated revenue, depending on
    /// [`StockMode`]. Never negative.
    pub state: f64,

    /// When the product was first added to the catalog.
    pub created_at: DateTime<Utc>,

    /// When the state last changed.
    pub updated_at: DateTime<Utc>,
}

impl StockLine {
    /// Whether this product is at or below the low-stock threshold.
    ///
    /// Only meaningful in quantity mode; revenue-mode state has no
    /// shortage semantics.
    #[inline]
    pub fn is_low(&self, threshold: f64) -> bool {
        self.state <= threshold
    }
}

/// Filters the lines at or below the low-stock threshold.
///
/// Recomputed on demand from a snapshot; nothing is stored.
pub fn low_stock(lines: &[StockLine], threshold: f64) -> Vec<&StockLine> {
    lines.iter().filter(|line| line.is_low(threshold)).collect()
}

// =============================================================================
// Cash Totals
// =============================================================================

/// Derived income/expense sums for a branch.
///
/// Recomputed on demand from the ledger, never stored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CashTotals {
    /// Sum of all income amounts.
    pub income: f64,
    /// Sum of all expense amounts.
    pub expense: f64,
}

impl CashTotals {
    /// Current cash balance: income minus expense.
    #[inline]
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

// =============================================================================
// Sale Receipt
// =============================================================================

/// What a successful sale returns to the caller for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// Identifier of the income ledger entry the sale produced.
    pub entry_id: i64,

    /// Product the sale was recorded against.
    pub product: String,

    /// Product state after the sale (remaining kilograms in quantity
    /// mode, accumulated revenue in revenue mode).
    pub state_after: f64,
}

// =============================================================================
// Restock Receipt
// =============================================================================

/// What a successful restock returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockReceipt {
    /// The canonical name the restock landed on: an existing entry when
    /// reconciliation merged the input, a new one otherwise.
    pub product: String,

    /// Kilograms on hand after the restock.
    pub state_after: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
