//! # Inventory Guard
//!
//! Stock sufficiency checks and the guarded stock decrement.
//!
//! ## Guarded Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ Read-then-write with the read's value:                              │
//! │     UPDATE book SET bstock = 46 WHERE bid = ?                          │
//! │                                                                         │
//! │  ✅ Delta update guarded by the invariant:                              │
//! │     UPDATE book SET bstock = bstock - ?2                               │
//! │     WHERE bid = ?1 AND bstock >= ?2                                    │
//! │                                                                         │
//! │  0 rows affected → stock moved underneath the earlier check            │
//! │                  → re-read, fail with InsufficientStock { current }    │
//! │                                                                         │
//! │  bstock can never go below zero, whatever ran between check and write. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The decrement only runs inside a sale transaction opened by
//! [`crate::ledger::SaleLedger`]; its failure rolls the whole sale back.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, LedgerResult};
use bookstore_core::{CoreError, StockCheck};

/// Read-only view of the inventory guard.
///
/// ## Usage
/// ```rust,ignore
/// let check = db.inventory().check_availability("B001", 2).await?;
/// if !check.sufficient {
///     println!("only {} left", check.current_stock);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InventoryGuard {
    pool: SqlitePool,
}

impl InventoryGuard {
    /// Creates a new InventoryGuard.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryGuard { pool }
    }

    /// Checks whether `quantity` copies of a book are in stock. No side effect.
    ///
    /// ## Errors
    /// * `NotFound` - Unknown book
    pub async fn check_availability(&self, book_id: &str, quantity: i64) -> LedgerResult<StockCheck> {
        let mut conn = self.pool.acquire().await?;
        check_availability(&mut conn, book_id, quantity).await
    }
}

async fn current_stock(conn: &mut SqliteConnection, book_id: &str) -> LedgerResult<Option<i64>> {
    let stock: Option<i64> = sqlx::query_scalar("SELECT bstock FROM book WHERE bid = ?1")
        .bind(book_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(stock)
}

pub(crate) async fn check_availability(
    conn: &mut SqliteConnection,
    book_id: &str,
    quantity: i64,
) -> LedgerResult<StockCheck> {
    let stock = current_stock(conn, book_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Book", book_id))?;

    Ok(StockCheck::evaluate(stock, quantity))
}

/// Removes `quantity` copies from stock, refusing to go below zero.
pub(crate) async fn decrement_stock(
    conn: &mut SqliteConnection,
    book_id: &str,
    quantity: i64,
) -> LedgerResult<()> {
    debug!(bid = %book_id, qty = quantity, "Decrementing stock");

    let result = sqlx::query(
        r#"
        UPDATE book
        SET bstock = bstock - ?2
        WHERE bid = ?1 AND bstock >= ?2
        "#,
    )
    .bind(book_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    // Stock changed (or the book vanished) since the caller's check
    check_availability(conn, book_id, quantity)
        .await?
        .ensure(book_id, quantity)?;

    Err(DbError::Internal(format!("stock decrement for {book_id} affected no rows")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::testing::seeded_db;

    #[tokio::test]
    async fn test_check_availability() {
        let db = seeded_db().await;
        let guard = db.inventory();

        let check = guard.check_availability("B001", 50).await.unwrap();
        assert_eq!(check, StockCheck { sufficient: true, current_stock: 50 });

        let check = guard.check_availability("B003", 21).await.unwrap();
        assert_eq!(check, StockCheck { sufficient: false, current_stock: 20 });

        // Pure read
        assert_eq!(db.books().get_by_id("B001").await.unwrap().unwrap().stock, 50);
    }

    #[tokio::test]
    async fn test_check_unknown_book() {
        let db = seeded_db().await;
        let err = db.inventory().check_availability("B404", 1).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::NotFound { entity: "Book", .. })
        ));
    }

    #[tokio::test]
    async fn test_decrement_refuses_to_go_negative() {
        let db = seeded_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        decrement_stock(&mut conn, "B002", 30).await.unwrap();

        let err = decrement_stock(&mut conn, "B002", 1).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InsufficientStock { current: 0, requested: 1, .. })
        ));
        drop(conn);

        assert_eq!(db.books().get_by_id("B002").await.unwrap().unwrap().stock, 0);
    }
}
