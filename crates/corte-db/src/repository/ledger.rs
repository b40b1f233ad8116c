//! # Ledger Repository
//!
//! Append-only cash movements, scoped by branch.
//!
//! ## Append-Only Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Lifecycle                               │
//! │                                                                     │
//! │  append() ──► new immutable row, fresh AUTOINCREMENT id             │
//! │                                                                     │
//! │  list()   ──► rows in id order (insertion order)                    │
//! │  totals() ──► SUM(income), SUM(expense), recomputed on demand       │
//! │                                                                     │
//! │  update?  ──► does not exist                                        │
//! │  delete?  ──► does not exist                                        │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Corrections are modeled as new offsetting entries by the caller; this
//! repository deliberately exposes no way to touch an inserted row.

use chrono::{DateTime, Timelike, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbResult, EngineResult};
use corte_core::validation::validate_amount;
use corte_core::{CashTotals, EntryKind, LedgerEntry};

/// Repository for cash movements (the LedgerStore).
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Appends a cash movement and returns its identifier.
    ///
    /// ## Errors
    /// `InvalidAmount` if `amount <= 0`; direction is carried by `kind`,
    /// never by sign.
    pub async fn append(
        &self,
        branch: &str,
        kind: EntryKind,
        amount: f64,
        memo: &str,
    ) -> EngineResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Self::append_on(&mut *conn, branch, kind, amount, memo).await
    }

    /// All movements for a branch, in insertion order (id ascending).
    ///
    /// Callers needing most-recent-first reverse it themselves.
    pub async fn list(&self, branch: &str) -> DbResult<Vec<LedgerEntry>> {
        let entries: Vec<LedgerEntry> = sqlx::query_as(
            r#"
            SELECT id, branch, kind, amount, memo, created_at
            FROM ledger
            WHERE branch = ?1
            ORDER BY id
            "#,
        )
        .bind(branch)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Income and expense sums for a branch.
    pub async fn totals(&self, branch: &str) -> DbResult<CashTotals> {
        let (income, expense): (Option<f64>, Option<f64>) = sqlx::query_as(
            r#"
            SELECT
                SUM(CASE WHEN kind = 'income' THEN amount END),
                SUM(CASE WHEN kind = 'expense' THEN amount END)
            FROM ledger
            WHERE branch = ?1
            "#,
        )
        .bind(branch)
        .fetch_one(&self.pool)
        .await?;

        Ok(CashTotals {
            income: income.unwrap_or(0.0),
            expense: expense.unwrap_or(0.0),
        })
    }

    // =========================================================================
    // Connection-level helpers
    // =========================================================================

    /// Append against an explicit connection, so the coordinator can pair
    /// it with a stock mutation in one transaction.
    pub(crate) async fn append_on(
        conn: &mut SqliteConnection,
        branch: &str,
        kind: EntryKind,
        amount: f64,
        memo: &str,
    ) -> EngineResult<i64> {
        validate_amount(amount)?;

        let created_at = minute_resolution(Utc::now());

        let result = sqlx::query(
            r#"
            INSERT INTO ledger (branch, kind, amount, memo, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(branch)
        .bind(kind)
        .bind(amount)
        .bind(memo)
        .bind(created_at)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        debug!(branch = %branch, id = %id, amount = %amount, "Ledger entry appended");

        Ok(id)
    }
}

/// Truncates a timestamp to minute resolution, the granularity ledger
/// entries are recorded at.
fn minute_resolution(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::pool::{Database, DbConfig};
    use corte_core::CoreError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_and_list_in_insertion_order() {
        let db = test_db().await;
        let ledger = db.ledger();

        let first = ledger
            .append("A", EntryKind::Income, 4500.0, "Sale 3kg Vacio")
            .await
            .unwrap();
        let second = ledger
            .append("A", EntryKind::Expense, 1200.0, "ice")
            .await
            .unwrap();

        assert!(second > first, "ids strictly increase in call order");

        let entries = ledger.list("A").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, first);
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert_eq!(entries[1].id, second);
        assert_eq!(entries[1].memo, "ice");
    }

    #[tokio::test]
    async fn test_append_rejects_non_positive_amounts() {
        let db = test_db().await;
        let ledger = db.ledger();

        for amount in [0.0, -100.0] {
            let err = ledger
                .append("A", EntryKind::Income, amount, "bad")
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                EngineError::Domain(CoreError::InvalidAmount { .. })
            ));
        }

        assert!(ledger.list("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals_balance_income_minus_expense() {
        let db = test_db().await;
        let ledger = db.ledger();

        ledger
            .append("A", EntryKind::Income, 4500.0, "Sale 3kg Vacio")
            .await
            .unwrap();
        ledger
            .append("A", EntryKind::Income, 3200.0, "Sale 2kg Asado")
            .await
            .unwrap();
        ledger
            .append("A", EntryKind::Expense, 1200.0, "ice")
            .await
            .unwrap();

        let totals = ledger.totals("A").await.unwrap();
        assert_eq!(totals.income, 7700.0);
        assert_eq!(totals.expense, 1200.0);
        assert_eq!(totals.balance(), 6500.0);
    }

    #[tokio::test]
    async fn test_totals_empty_branch_is_zero() {
        let db = test_db().await;
        let totals = db.ledger().totals("nowhere").await.unwrap();
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.balance(), 0.0);
    }

    #[tokio::test]
    async fn test_entries_are_branch_scoped() {
        let db = test_db().await;
        let ledger = db.ledger();

        ledger
            .append("A", EntryKind::Income, 100.0, "a")
            .await
            .unwrap();
        ledger
            .append("B", EntryKind::Income, 200.0, "b")
            .await
            .unwrap();

        assert_eq!(ledger.list("A").await.unwrap().len(), 1);
        assert_eq!(ledger.totals("B").await.unwrap().income, 200.0);
    }

    #[test]
    fn test_minute_resolution_drops_seconds() {
        let ts = Utc::now();
        let truncated = minute_resolution(ts);
        assert_eq!(truncated.second(), 0);
        assert_eq!(truncated.nanosecond(), 0);
        assert_eq!(truncated.minute(), ts.minute());
    }
}
