//! # Stock Repository
//!
//! Per-branch product state: kilograms on hand in quantity mode,
//! accumulated revenue in revenue mode.
//!
//! ## Key Operations
//! - Branch-scoped reads (`get`, `names`)
//! - Delta mutation with the non-negativity check *before* any write
//! - Catalog management (`add_blank`, `set`, `delete`)
//!
//! The store is polymorphic over [`StockMode`] instead of existing twice:
//! the only behavioral difference is whether a negative resulting state
//! is an error.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult, EngineResult};
use corte_core::reconcile::canonicalize_name;
use corte_core::validation::validate_product_name;
use corte_core::{CoreError, StockLine, StockMode};

/// Repository for product state (the InventoryStore).
///
/// ## Usage
/// ```rust,ignore
/// let stock = db.stock();
///
/// stock.add_blank("Super Montaña", "vacío").await?;
/// let lines = stock.get("Super Montaña").await?;
/// ```
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
    mode: StockMode,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool, mode: StockMode) -> Self {
        StockRepository { pool, mode }
    }

    /// All product rows for a branch.
    ///
    /// Returned in name order for stable output; callers wanting a
    /// ranking sort by state themselves.
    pub async fn get(&self, branch: &str) -> DbResult<Vec<StockLine>> {
        let lines: Vec<StockLine> = sqlx::query_as(
            r#"
            SELECT branch, name, state, created_at, updated_at
            FROM stock
            WHERE branch = ?1
            ORDER BY name
            "#,
        )
        .bind(branch)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// The catalog names of a branch (reconciliation snapshot).
    pub async fn names(&self, branch: &str) -> DbResult<Vec<String>> {
        let mut conn = self.pool.acquire().await?;
        Self::names_on(&mut *conn, branch).await
    }

    /// Adds `delta` to a product's state, creating the row if absent.
    ///
    /// ## Arguments
    /// * `delta` - Positive for restocks, negative for quantity-mode sales
    ///
    /// ## Returns
    /// The state after the mutation.
    ///
    /// ## Errors
    /// `InsufficientStock` if the resulting state would be negative in
    /// quantity mode. The check runs before any write: on failure the
    /// row is untouched.
    pub async fn upsert_add(&self, branch: &str, name: &str, delta: f64) -> EngineResult<f64> {
        let mut conn = self.pool.acquire().await?;
        Self::apply_delta(&mut *conn, self.mode, branch, name, delta).await
    }

    /// Overwrites a product's state unconditionally.
    ///
    /// Used by "reset" in revenue mode (start a new ranking period).
    pub async fn set(&self, branch: &str, name: &str, value: f64) -> DbResult<()> {
        debug!(branch = %branch, name = %name, value = %value, "Setting stock state");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE stock SET state = ?3, updated_at = ?4
            WHERE branch = ?1 AND name = ?2
            "#,
        )
        .bind(branch)
        .bind(name)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", name));
        }

        Ok(())
    }

    /// Removes a product from the branch catalog.
    ///
    /// Idempotent: deleting an absent product is a no-op, not an error.
    pub async fn delete(&self, branch: &str, name: &str) -> DbResult<()> {
        debug!(branch = %branch, name = %name, "Deleting product");

        sqlx::query("DELETE FROM stock WHERE branch = ?1 AND name = ?2")
            .bind(branch)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Adds a product to the catalog with zero state.
    ///
    /// Idempotent: if the canonical name already exists in the branch,
    /// nothing changes. This path is catalog management: the operator is
    /// explicitly declaring a new entry, so the reconciler is NOT
    /// consulted.
    ///
    /// ## Returns
    /// The canonical name the row is keyed under.
    pub async fn add_blank(&self, branch: &str, raw_name: &str) -> EngineResult<String> {
        validate_product_name(raw_name)?;
        let name = canonicalize_name(raw_name);

        debug!(branch = %branch, name = %name, "Adding catalog entry");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO stock (branch, name, state, created_at, updated_at)
            VALUES (?1, ?2, 0, ?3, ?3)
            "#,
        )
        .bind(branch)
        .bind(&name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(name)
    }

    // =========================================================================
    // Connection-level helpers
    // =========================================================================
    // The coordinator runs these on its own transaction connection so the
    // stock mutation and the ledger append commit together.

    /// Delta mutation against an explicit connection.
    ///
    /// Reads the current state, verifies the quantity-mode invariant,
    /// then writes, so a failing check leaves the row untouched even
    /// outside a transaction.
    pub(crate) async fn apply_delta(
        conn: &mut SqliteConnection,
        mode: StockMode,
        branch: &str,
        name: &str,
        delta: f64,
    ) -> EngineResult<f64> {
        let current: Option<f64> =
            sqlx::query_scalar("SELECT state FROM stock WHERE branch = ?1 AND name = ?2")
                .bind(branch)
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;

        let available = current.unwrap_or(0.0);
        let next = available + delta;

        if mode == StockMode::Quantity && next < 0.0 {
            return Err(CoreError::InsufficientStock {
                name: name.to_string(),
                available,
                requested: -delta,
            }
            .into());
        }

        debug!(branch = %branch, name = %name, delta = %delta, next = %next, "Applying stock delta");

        let now = Utc::now();
        match current {
            Some(_) => {
                sqlx::query(
                    r#"
                    UPDATE stock SET state = state + ?3, updated_at = ?4
                    WHERE branch = ?1 AND name = ?2
                    "#,
                )
                .bind(branch)
                .bind(name)
                .bind(delta)
                .bind(now)
                .execute(&mut *conn)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO stock (branch, name, state, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?4)
                    "#,
                )
                .bind(branch)
                .bind(name)
                .bind(delta)
                .bind(now)
                .execute(&mut *conn)
                .await?;
            }
        }

        Ok(next)
    }

    /// Catalog names against an explicit connection.
    pub(crate) async fn names_on(
        conn: &mut SqliteConnection,
        branch: &str,
    ) -> DbResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM stock WHERE branch = ?1 ORDER BY name")
                .bind(branch)
                .fetch_all(&mut *conn)
                .await?;

        Ok(names)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::pool::{Database, DbConfig, EngineConfig};

    async fn test_db(mode: StockMode) -> Database {
        let config = DbConfig::in_memory().engine(EngineConfig::default().mode(mode));
        Database::new(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_upsert_add_creates_then_accumulates() {
        let db = test_db(StockMode::Quantity).await;
        let stock = db.stock();

        let state = stock.upsert_add("A", "Vacio", 10.0).await.unwrap();
        assert_eq!(state, 10.0);

        let state = stock.upsert_add("A", "Vacio", -3.0).await.unwrap();
        assert_eq!(state, 7.0);

        let lines = stock.get("A").await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Vacio");
        assert_eq!(lines[0].state, 7.0);
    }

    #[tokio::test]
    async fn test_upsert_add_rejects_oversell_before_writing() {
        let db = test_db(StockMode::Quantity).await;
        let stock = db.stock();

        stock.upsert_add("A", "Vacio", 7.0).await.unwrap();

        let err = stock.upsert_add("A", "Vacio", -20.0).await.unwrap_err();
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

        // Nothing was written
        let lines = stock.get("A").await.unwrap();
        assert_eq!(lines[0].state, 7.0);
    }

    #[tokio::test]
    async fn test_upsert_add_missing_product_reports_zero_available() {
        let db = test_db(StockMode::Quantity).await;

        let err = db.stock().upsert_add("A", "Vacio", -1.0).await.unwrap_err();
        match err {
            EngineError::Domain(CoreError::InsufficientStock { available, .. }) => {
                assert_eq!(available, 0.0);
            }
            other => panic!("expected InsufficientStock, got {other}"),
        }
        assert!(db.stock().get("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_revenue_mode_accumulates_money() {
        let db = test_db(StockMode::Revenue).await;
        let stock = db.stock();

        stock.upsert_add("A", "Vacio", 4500.0).await.unwrap();
        let state = stock.upsert_add("A", "Vacio", 3200.0).await.unwrap();
        assert_eq!(state, 7700.0);
    }

    #[tokio::test]
    async fn test_add_blank_is_idempotent_and_canonicalizes() {
        let db = test_db(StockMode::Quantity).await;
        let stock = db.stock();

        let name = stock.add_blank("A", "vacio ").await.unwrap();
        assert_eq!(name, "Vacio");

        // Second add of the same canonical name is a no-op
        stock.add_blank("A", "Vacio").await.unwrap();

        let lines = stock.get("A").await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].state, 0.0);
    }

    #[tokio::test]
    async fn test_add_blank_rejects_blank_names() {
        let db = test_db(StockMode::Quantity).await;

        let err = db.stock().add_blank("A", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Domain(CoreError::EmptyName)
        ));
    }

    #[tokio::test]
    async fn test_set_resets_state() {
        let db = test_db(StockMode::Revenue).await;
        let stock = db.stock();

        stock.upsert_add("A", "Vacio", 9000.0).await.unwrap();
        stock.set("A", "Vacio", 0.0).await.unwrap();

        let lines = stock.get("A").await.unwrap();
        assert_eq!(lines[0].state, 0.0);
    }

    #[tokio::test]
    async fn test_set_missing_product_is_not_found() {
        let db = test_db(StockMode::Revenue).await;
        assert!(db.stock().set("A", "Vacio", 0.0).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db(StockMode::Quantity).await;
        let stock = db.stock();

        stock.add_blank("A", "Vacio").await.unwrap();
        stock.delete("A", "Vacio").await.unwrap();
        // Deleting again is fine
        stock.delete("A", "Vacio").await.unwrap();

        assert!(stock.get("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_branches_are_isolated() {
        let db = test_db(StockMode::Quantity).await;
        let stock = db.stock();

        stock.upsert_add("A", "Vacio", 10.0).await.unwrap();
        stock.upsert_add("B", "Vacio", 2.0).await.unwrap();

        assert_eq!(stock.get("A").await.unwrap()[0].state, 10.0);
        assert_eq!(stock.get("B").await.unwrap()[0].state, 2.0);
        assert_eq!(stock.names("A").await.unwrap(), vec!["Vacio"]);
    }
}
