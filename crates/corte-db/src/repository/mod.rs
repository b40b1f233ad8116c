//! # Repository Module
//!
//! Database repository implementations for Corte POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  Caller                                                             │
//! │    │   db.stock().get("Super Montaña")                              │
//! │    ▼                                                                │
//! │  StockRepository / LedgerRepository                                 │
//! │    │   SQL, isolated in one place                                   │
//! │    ▼                                                                │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Mutating helpers also exist at connection level so the             │
//! │  TransactionCoordinator can run the same SQL inside one             │
//! │  transaction.                                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`stock::StockRepository`] - Per-branch product state (InventoryStore)
//! - [`ledger::LedgerRepository`] - Append-only cash movements (LedgerStore)

pub mod ledger;
pub mod stock;
