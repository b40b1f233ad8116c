//! # Transaction Coordinator
//!
//! The three operator-facing operations, each a single logical
//! transaction.
//!
//! ## The Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    register_sale("A", "Vacio", 3, 4500)             │
//! │                                                                     │
//! │  1. VALIDATE                                                        │
//! │     └── quantity > 0, amount > 0 (nothing touched on failure)       │
//! │                                                                     │
//! │  2. BEGIN                                                           │
//! │     ├── quantity mode: stock -= 3kg   (InsufficientStock aborts)    │
//! │     │   revenue mode:  stock += $4500                               │
//! │     └── ledger ← Income $4500 "Sale 3kg Vacio"                      │
//! │                                                                     │
//! │  3. COMMIT, or the transaction drops and BOTH writes roll back      │
//! │                                                                     │
//! │  Money recorded without inventory leaving (or vice versa) cannot    │
//! │  be observed.                                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restock touches only stock (no cash event) and expense touches only
//! the ledger; sale is the one place a real transactional boundary is
//! mandatory.
//!
//! Catalog management (`add_blank`, `set`, `delete`) bypasses the
//! coordinator entirely; see [`crate::repository::stock::StockRepository`].

use sqlx::SqlitePool;
use tracing::info;

use crate::error::EngineResult;
use crate::pool::EngineConfig;
use crate::repository::ledger::LedgerRepository;
use crate::repository::stock::StockRepository;
use corte_core::validation::{validate_amount, validate_product_name, validate_quantity};
use corte_core::{
    CoreError, EntryKind, NameReconciler, RestockReceipt, SaleReceipt, StockMode,
};

/// Composes stock mutations and ledger appends into atomic operator
/// actions.
#[derive(Debug, Clone)]
pub struct TransactionCoordinator {
    pool: SqlitePool,
    mode: StockMode,
    reconciler: NameReconciler,
}

impl TransactionCoordinator {
    /// Creates a coordinator for the configured deployment.
    pub fn new(pool: SqlitePool, engine: EngineConfig) -> Self {
        TransactionCoordinator {
            pool,
            mode: engine.mode,
            reconciler: NameReconciler::new(engine.similarity_threshold),
        }
    }

    /// Registers a sale: the paired stock mutation and income entry.
    ///
    /// ## Arguments
    /// * `product_name` - Catalog name (operators pick from a list here;
    ///   free-text reconciliation belongs to restock)
    /// * `quantity` - Kilograms sold; in revenue mode this is purely
    ///   informational and only lands in the memo
    /// * `amount_charged` - Total money collected
    ///
    /// ## Errors
    /// * `InvalidQuantity` / `InvalidAmount` - before anything is written
    /// * `InsufficientStock` - quantity mode, reported with the available
    ///   kilograms; nothing is written
    pub async fn register_sale(
        &self,
        branch: &str,
        product_name: &str,
        quantity: f64,
        amount_charged: f64,
    ) -> EngineResult<SaleReceipt> {
        validate_quantity(quantity)?;
        validate_amount(amount_charged)?;

        let mut tx = self.pool.begin().await?;

        // In quantity mode a sale consumes kilograms; in revenue mode it
        // grows the product's accumulated takings instead.
        let delta = match self.mode {
            StockMode::Quantity => -quantity,
            StockMode::Revenue => amount_charged,
        };
        let state_after =
            StockRepository::apply_delta(&mut *tx, self.mode, branch, product_name, delta).await?;

        let memo = format!("Sale {quantity}kg {product_name}");
        let entry_id =
            LedgerRepository::append_on(&mut *tx, branch, EntryKind::Income, amount_charged, &memo)
                .await?;

        tx.commit().await?;

        info!(
            branch = %branch,
            product = %product_name,
            quantity = %quantity,
            amount = %amount_charged,
            entry_id = %entry_id,
            "Sale registered"
        );

        Ok(SaleReceipt {
            entry_id,
            product: product_name.to_string(),
            state_after,
        })
    }

    /// Registers a restock of `quantity` kilograms (quantity mode only).
    ///
    /// The free-text name is reconciled against the branch catalog inside
    /// the same transaction that applies the delta, so the snapshot the
    /// reconciler sees is the one the write lands on. No ledger entry is
    /// produced; restocking is not a cash event.
    pub async fn register_restock(
        &self,
        branch: &str,
        raw_name: &str,
        quantity: f64,
    ) -> EngineResult<RestockReceipt> {
        if self.mode == StockMode::Revenue {
            return Err(CoreError::UnsupportedInMode {
                operation: "restock",
                mode: self.mode,
            }
            .into());
        }

        validate_product_name(raw_name)?;
        validate_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;

        let existing = StockRepository::names_on(&mut *tx, branch).await?;
        let name = self
            .reconciler
            .reconcile(raw_name, existing.iter().map(String::as_str));

        let state_after =
            StockRepository::apply_delta(&mut *tx, self.mode, branch, &name, quantity).await?;

        tx.commit().await?;

        info!(
            branch = %branch,
            input = %raw_name,
            product = %name,
            quantity = %quantity,
            "Restock registered"
        );

        Ok(RestockReceipt {
            product: name,
            state_after,
        })
    }

    /// Registers an operating expense.
    pub async fn register_expense(
        &self,
        branch: &str,
        amount: f64,
        memo: &str,
    ) -> EngineResult<i64> {
        validate_amount(amount)?;

        let mut conn = self.pool.acquire().await?;
        let entry_id =
            LedgerRepository::append_on(&mut *conn, branch, EntryKind::Expense, amount, memo)
                .await?;

        info!(branch = %branch, amount = %amount, entry_id = %entry_id, "Expense registered");

        Ok(entry_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::pool::{Database, DbConfig};

    async fn test_db(mode: StockMode) -> Database {
        let config = DbConfig::in_memory().engine(EngineConfig::default().mode(mode));
        Database::new(config).await.unwrap()
    }

    /// The full counter workflow on an empty branch: restock, sell,
    /// oversell, spend.
    #[tokio::test]
    async fn test_quantity_mode_counter_workflow() {
        let db = test_db(StockMode::Quantity).await;
        let coordinator = db.coordinator();

        // Restock with a lowercase name seeds the canonical entry
        let restock = coordinator
            .register_restock("A", "vacio", 10.0)
            .await
            .unwrap();
        assert_eq!(restock.product, "Vacio");
        assert_eq!(restock.state_after, 10.0);

        // No cash event from restocking
        assert!(db.ledger().list("A").await.unwrap().is_empty());

        // Sell 3kg for $4500
        let receipt = coordinator
            .register_sale("A", "Vacio", 3.0, 4500.0)
            .await
            .unwrap();
        assert_eq!(receipt.state_after, 7.0);

        let entries = db.ledger().list("A").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert_eq!(entries[0].amount, 4500.0);
        assert!(entries[0].memo.contains("3kg Vacio"));
        assert_eq!(db.ledger().totals("A").await.unwrap().balance(), 4500.0);

        // Overselling fails, reports what is available, writes nothing
        let err = coordinator
            .register_sale("A", "Vacio", 20.0, 30000.0)
            .await
            .unwrap_err();
        match err {
            EngineError::Domain(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 7.0);
                assert_eq!(requested, 20.0);
            }
            other => panic!("expected InsufficientStock, got {other}"),
        }
        assert_eq!(db.stock().get("A").await.unwrap()[0].state, 7.0);
        assert_eq!(db.ledger().list("A").await.unwrap().len(), 1);

        // Expense brings the balance down
        coordinator
            .register_expense("A", 1200.0, "ice")
            .await
            .unwrap();
        assert_eq!(db.ledger().totals("A").await.unwrap().balance(), 3300.0);
    }

    #[tokio::test]
    async fn test_revenue_mode_sale_accumulates_takings() {
        let db = test_db(StockMode::Revenue).await;
        let coordinator = db.coordinator();

        db.stock().add_blank("A", "Vacio").await.unwrap();

        let receipt = coordinator
            .register_sale("A", "Vacio", 3.0, 4500.0)
            .await
            .unwrap();
        assert_eq!(receipt.state_after, 4500.0);

        let receipt = coordinator
            .register_sale("A", "Vacio", 2.0, 3200.0)
            .await
            .unwrap();
        assert_eq!(receipt.state_after, 7700.0);

        // The quantity is informational and only lands in the memo
        let entries = db.ledger().list("A").await.unwrap();
        assert!(entries[0].memo.contains("3kg Vacio"));
        assert_eq!(db.ledger().totals("A").await.unwrap().income, 7700.0);
    }

    #[tokio::test]
    async fn test_restock_merges_typo_into_existing_product() {
        let db = test_db(StockMode::Quantity).await;
        let coordinator = db.coordinator();

        coordinator
            .register_restock("A", "Vacio", 10.0)
            .await
            .unwrap();
        db.stock().add_blank("A", "Asado").await.unwrap();

        // Accent + trailing space still lands on the existing entry
        let restock = coordinator
            .register_restock("A", "Vacío ", 5.0)
            .await
            .unwrap();
        assert_eq!(restock.product, "Vacio");
        assert_eq!(restock.state_after, 15.0);

        // A genuinely new cut creates its own row
        let restock = coordinator
            .register_restock("A", "costilla", 4.0)
            .await
            .unwrap();
        assert_eq!(restock.product, "Costilla");

        let names = db.stock().names("A").await.unwrap();
        assert_eq!(names, vec!["Asado", "Costilla", "Vacio"]);
    }

    #[tokio::test]
    async fn test_restock_is_unavailable_in_revenue_mode() {
        let db = test_db(StockMode::Revenue).await;

        let err = db
            .coordinator()
            .register_restock("A", "Vacio", 10.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Domain(CoreError::UnsupportedInMode { .. })
        ));
    }

    #[tokio::test]
    async fn test_validation_failures_write_nothing() {
        let db = test_db(StockMode::Quantity).await;
        let coordinator = db.coordinator();

        coordinator
            .register_restock("A", "Vacio", 10.0)
            .await
            .unwrap();

        assert!(coordinator
            .register_sale("A", "Vacio", 0.0, 4500.0)
            .await
            .is_err());
        assert!(coordinator
            .register_sale("A", "Vacio", 3.0, -1.0)
            .await
            .is_err());
        assert!(coordinator.register_expense("A", 0.0, "ice").await.is_err());
        assert!(coordinator
            .register_restock("A", "  ", 5.0)
            .await
            .is_err());
        assert!(coordinator
            .register_restock("A", "Vacio", -5.0)
            .await
            .is_err());

        assert_eq!(db.stock().get("A").await.unwrap()[0].state, 10.0);
        assert!(db.ledger().list("A").await.unwrap().is_empty());
    }

    /// Forces the ledger append to fail after the stock mutation by
    /// dropping the ledger table, then observes that the stock write
    /// rolled back.
    #[tokio::test]
    async fn test_sale_rolls_back_stock_when_ledger_append_fails() {
        let db = test_db(StockMode::Quantity).await;
        let coordinator = db.coordinator();

        coordinator
            .register_restock("A", "Vacio", 10.0)
            .await
            .unwrap();

        sqlx::query("DROP TABLE ledger")
            .execute(db.pool())
            .await
            .unwrap();

        let err = coordinator
            .register_sale("A", "Vacio", 3.0, 4500.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Db(_)));

        // The stock decrement must not survive the failed append
        assert_eq!(db.stock().get("A").await.unwrap()[0].state, 10.0);
    }

    #[tokio::test]
    async fn test_ledger_ids_increase_across_operations() {
        let db = test_db(StockMode::Quantity).await;
        let coordinator = db.coordinator();

        coordinator
            .register_restock("A", "Vacio", 50.0)
            .await
            .unwrap();

        let first = coordinator
            .register_sale("A", "Vacio", 1.0, 1000.0)
            .await
            .unwrap()
            .entry_id;
        let second = coordinator
            .register_expense("A", 200.0, "bags")
            .await
            .unwrap();
        let third = coordinator
            .register_sale("A", "Vacio", 2.0, 2000.0)
            .await
            .unwrap()
            .entry_id;

        assert!(first < second && second < third);
    }
}
