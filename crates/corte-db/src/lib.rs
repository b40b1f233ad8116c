//! # corte-db: Database Layer for Corte POS
//!
//! This crate provides database access for the Corte POS engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Corte POS Data Flow                           │
//! │                                                                     │
//! │  Operator intent (sell / restock / spend / catalog change)          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                   corte-db (THIS CRATE)                     │    │
//! │  │                                                             │    │
//! │  │  ┌─────────────┐  ┌──────────────┐  ┌───────────────────┐   │    │
//! │  │  │  Database   │  │ Repositories │  │    Transaction    │   │    │
//! │  │  │  (pool.rs)  │  │ stock/ledger │  │    Coordinator    │   │    │
//! │  │  │             │◄─┤              │◄─┤                   │   │    │
//! │  │  │ SqlitePool  │  │ branch-keyed │  │ sale = stock +    │   │    │
//! │  │  │ Migrations  │  │ SQL          │  │ ledger, atomic    │   │    │
//! │  │  └─────────────┘  └──────────────┘  └───────────────────┘   │    │
//! │  │                                                             │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite Database (one file per shop, WAL mode)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, `DbConfig` and `EngineConfig`
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - `DbError` and the combined `EngineError`
//! - [`repository`] - Stock and ledger repositories
//! - [`coordinator`] - The three operator-facing operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use corte_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./corte.db")).await?;
//!
//! db.coordinator().register_restock("Super Montaña", "vacío", 10.0).await?;
//! db.coordinator().register_sale("Super Montaña", "Vacío", 3.0, 4500.0).await?;
//!
//! let totals = db.ledger().totals("Super Montaña").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coordinator;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use coordinator::TransactionCoordinator;
pub use error::{DbError, EngineError};
pub use pool::{Database, DbConfig, EngineConfig};

// Repository re-exports for convenience
pub use repository::ledger::LedgerRepository;
pub use repository::stock::StockRepository;
