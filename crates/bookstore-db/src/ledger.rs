//! # Sale Ledger
//!
//! The write path of the bookstore: recording sales and amending discounts.
//! Every call that mutates runs in exactly one SQLite transaction.
//!
//! ## Create Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create_sale(NewSale)                              │
//! │                                                                         │
//! │  NewSale::validate()           date → quantity      (no store access)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─────────────────────────────────────────────────────────┐      │
//! │  │  member::find         → NotFound("Member")                   │      │
//! │  │  book::find           → NotFound("Book")                     │      │
//! │  │  StockCheck::ensure   → InsufficientStock { current }        │      │
//! │  │  total = price × qty − discount  → TotalOutOfRange           │      │
//! │  │  inventory::decrement_stock   (guarded UPDATE)               │      │
//! │  │  sale::insert         → sid                                  │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! │       │ Ok                          │ Err                               │
//! │       ▼                             ▼                                   │
//! │    COMMIT                       ROLLBACK (stock and sale untouched)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Amendment
//! Only `sdiscount` and `stotal` of the target sale change. The new total is
//! computed from the book's price *now*, not the price at the time of sale.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, LedgerError, LedgerResult};
use crate::inventory;
use crate::repository::report::ReportRepository;
use crate::repository::{book, member, sale};
use bookstore_core::ledger::amended_total;
use bookstore_core::validation::validate_selection;
use bookstore_core::{CoreError, Money, NewSale, SaleBrief, SaleId, SaleView};

/// Entry point for ledger operations.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = db.ledger();
///
/// let sid = ledger
///     .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 2, 100))
///     .await?;
///
/// let new_total = ledger.amend_discount(sid, 50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SaleLedger {
    pool: SqlitePool,
}

impl SaleLedger {
    /// Creates a new SaleLedger.
    pub fn new(pool: SqlitePool) -> Self {
        SaleLedger { pool }
    }

    /// Records a sale and decrements the book's stock, atomically.
    ///
    /// ## Errors
    /// First failure wins, and nothing is written on any of them:
    /// * `InvalidDate` - Not a `YYYY-MM-DD` calendar date
    /// * `InvalidQuantity` - Quantity is zero or negative
    /// * `NotFound` - Unknown member (checked first), then unknown book
    /// * `InsufficientStock` - Carries the current stock
    /// * `TotalOutOfRange` - The total does not fit in an i64
    /// * `PersistenceFailure` - Storage failed; the transaction was rolled back
    pub async fn create_sale(&self, new_sale: &NewSale) -> LedgerResult<SaleId> {
        new_sale.validate()?;

        let mut tx = self.begin().await?;

        match record_sale(&mut *tx, new_sale).await {
            Ok((sale_id, total)) => {
                commit(tx).await?;
                info!(
                    sid = sale_id,
                    mid = %new_sale.member_id,
                    bid = %new_sale.book_id,
                    qty = new_sale.quantity,
                    total = %total,
                    "Sale recorded"
                );
                Ok(sale_id)
            }
            Err(err) => {
                rollback(tx, "create_sale", &err).await;
                Err(err)
            }
        }
    }

    /// Replaces the discount of a recorded sale and returns the new total.
    ///
    /// ## Errors
    /// * `NotFound` - No sale with this ID (checked before the discount)
    /// * `InvalidDiscount` - Negative discount
    /// * `TotalOutOfRange` - The total at the current price does not fit in an i64
    /// * `PersistenceFailure` - Storage failed; the transaction was rolled back
    pub async fn amend_discount(&self, sale_id: SaleId, new_discount: i64) -> LedgerResult<Money> {
        let mut tx = self.begin().await?;

        match amend(&mut *tx, sale_id, new_discount).await {
            Ok(total) => {
                commit(tx).await?;
                info!(sid = sale_id, discount = new_discount, total = %total, "Discount amended");
                Ok(total)
            }
            Err(err) => {
                rollback(tx, "amend_discount", &err).await;
                Err(err)
            }
        }
    }

    /// Amends the sale at a 1-indexed `position` of [`Self::list_sales_brief`].
    ///
    /// ## Returns
    /// The amended sale's ID and its new total.
    pub async fn amend_discount_at(
        &self,
        position: usize,
        new_discount: i64,
    ) -> LedgerResult<(SaleId, Money)> {
        let rows = self.list_sales_brief().await?;
        let position = i64::try_from(position).unwrap_or(i64::MAX);
        let index = validate_selection(position, rows.len())?;
        let sale_id = rows[index - 1].sale_id;

        debug!(position = index, sid = sale_id, "Resolved picker selection");

        let total = self.amend_discount(sale_id, new_discount).await?;
        Ok((sale_id, total))
    }

    /// Full sale report, ordered by sale ID.
    pub async fn list_sales(&self) -> LedgerResult<Vec<SaleView>> {
        Ok(self.reports().list_sales().await?)
    }

    /// Picker listing, in the same order as [`Self::list_sales`].
    pub async fn list_sales_brief(&self) -> LedgerResult<Vec<SaleBrief>> {
        Ok(self.reports().list_sales_brief().await?)
    }

    fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    async fn begin(&self) -> LedgerResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::transaction("begin", e).into())
    }
}

// =============================================================================
// Transaction Bodies
// =============================================================================

async fn record_sale(conn: &mut SqliteConnection, new_sale: &NewSale) -> LedgerResult<(SaleId, Money)> {
    member::find(conn, &new_sale.member_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Member", new_sale.member_id.as_str()))?;

    let book = book::find(conn, &new_sale.book_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Book", new_sale.book_id.as_str()))?;

    book.stock_check(new_sale.quantity)
        .ensure(&book.id, new_sale.quantity)?;

    let total = new_sale.total_at(book.unit_price())?;

    inventory::decrement_stock(conn, &book.id, new_sale.quantity).await?;
    let sale_id = sale::insert(conn, new_sale, total).await?;

    Ok((sale_id, total))
}

async fn amend(conn: &mut SqliteConnection, sale_id: SaleId, new_discount: i64) -> LedgerResult<Money> {
    let pricing = sale::pricing(conn, sale_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Sale", sale_id.to_string()))?;

    let total = amended_total(Money::new(pricing.unit_price), pricing.quantity, new_discount)?;

    sale::update_discount(conn, sale_id, new_discount, total).await?;

    Ok(total)
}

async fn commit(tx: Transaction<'static, Sqlite>) -> LedgerResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::transaction("commit", e).into())
}

/// Rolls back and logs. A failed ROLLBACK is logged, never returned.
async fn rollback(tx: Transaction<'static, Sqlite>, operation: &str, cause: &LedgerError) {
    if cause.is_validation() {
        debug!(operation, error = %cause, "Rejected, rolling back");
    } else {
        warn!(operation, error = %cause, "Persistence failure, rolling back");
    }

    if let Err(e) = tx.rollback().await {
        warn!(operation, error = %e, "Rollback failed");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_db;
    use crate::Database;

    async fn stock_of(db: &Database, book_id: &str) -> i64 {
        db.books().get_by_id(book_id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_create_sale_decrements_stock() {
        let db = seeded_db().await;
        let ledger = db.ledger();

        let sid = ledger
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 2, 100))
            .await
            .unwrap();

        assert_eq!(sid, 5);
        assert_eq!(stock_of(&db, "B001").await, 48);

        let stored = db.sales().get_by_id(sid).await.unwrap().unwrap();
        assert_eq!(stored.date, "2024-02-01");
        assert_eq!(stored.member_id, "M001");
        assert_eq!(stored.book_id, "B001");
        assert_eq!(stored.quantity, 2);
        assert_eq!(stored.discount, 100);
        assert_eq!(stored.total, 1100);
    }

    #[tokio::test]
    async fn test_insufficient_stock_reports_current() {
        let db = seeded_db().await;
        let ledger = db.ledger();

        ledger
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 2, 100))
            .await
            .unwrap();

        let err = ledger
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 100, 0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InsufficientStock { current: 48, requested: 100, .. })
        ));
        assert_eq!(stock_of(&db, "B001").await, 48);
        assert_eq!(db.sales().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_selling_entire_stock_is_allowed() {
        let db = seeded_db().await;

        db.ledger()
            .create_sale(&NewSale::new("2024-02-01", "M002", "B003", 20, 0))
            .await
            .unwrap();

        assert_eq!(stock_of(&db, "B003").await, 0);
    }

    #[tokio::test]
    async fn test_unknown_member_or_book_changes_nothing() {
        let db = seeded_db().await;
        let ledger = db.ledger();

        let err = ledger
            .create_sale(&NewSale::new("2024-02-01", "M999", "B001", 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::NotFound { entity: "Member", .. })
        ));

        let err = ledger
            .create_sale(&NewSale::new("2024-02-01", "M001", "B999", 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::NotFound { entity: "Book", .. })
        ));

        // Member is checked before book
        let err = ledger
            .create_sale(&NewSale::new("2024-02-01", "M999", "B999", 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::NotFound { entity: "Member", .. })
        ));

        assert_eq!(stock_of(&db, "B001").await, 50);
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_date_is_validated_first() {
        let db = seeded_db().await;

        let err = db
            .ledger()
            .create_sale(&NewSale::new("2024-2-1", "M999", "B999", 0, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Core(CoreError::InvalidDate(_))));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_quantity() {
        let db = seeded_db().await;

        let err = db
            .ledger()
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 0, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Core(CoreError::InvalidQuantity(_))));
        assert_eq!(stock_of(&db, "B001").await, 50);
    }

    #[tokio::test]
    async fn test_negative_discount_accepted_at_creation() {
        let db = seeded_db().await;

        let sid = db
            .ledger()
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 1, -100))
            .await
            .unwrap();

        let stored = db.sales().get_by_id(sid).await.unwrap().unwrap();
        assert_eq!(stored.discount, -100);
        assert_eq!(stored.total, 700);
    }

    #[tokio::test]
    async fn test_total_overflow_changes_nothing() {
        let db = seeded_db().await;

        let err = db
            .ledger()
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 1, i64::MIN))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Core(CoreError::TotalOutOfRange { unit_price: 600, quantity: 1, .. })
        ));
        assert_eq!(stock_of(&db, "B001").await, 50);
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_amend_overflow_keeps_sale() {
        let db = seeded_db().await;
        db.books().update_price("B001", i64::MAX).await.unwrap();

        // Sale 1: two copies of B001
        let err = db.ledger().amend_discount(1, 0).await.unwrap_err();
        assert!(matches!(err, LedgerError::Core(CoreError::TotalOutOfRange { .. })));

        let stored = db.sales().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.discount, 100);
        assert_eq!(stored.total, 1100);
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back_decrement() {
        let db = seeded_db().await;

        // Fails the insert that follows the stock decrement
        sqlx::query(
            r#"
            CREATE TRIGGER fail_sale BEFORE INSERT ON sale
            WHEN NEW.sqty = 7
            BEGIN
                SELECT RAISE(ABORT, 'injected failure');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .ledger()
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 7, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::PersistenceFailure(_)));
        assert!(!err.is_validation());
        assert_eq!(stock_of(&db, "B001").await, 50);
        assert_eq!(db.sales().count().await.unwrap(), 4);

        // Database stays usable
        db.ledger()
            .create_sale(&NewSale::new("2024-02-01", "M001", "B001", 2, 0))
            .await
            .unwrap();
        assert_eq!(stock_of(&db, "B001").await, 48);
    }

    #[tokio::test]
    async fn test_amend_discount_touches_only_target_sale() {
        let db = seeded_db().await;
        let before = db.sales().list().await.unwrap();
        let books_before = db.books().list().await.unwrap();

        let total = db.ledger().amend_discount(4, 50).await.unwrap();
        assert_eq!(total, Money::new(550));

        let after = db.sales().list().await.unwrap();
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            if old.id == 4 {
                assert_eq!(new.discount, 50);
                assert_eq!(new.total, 550);
                assert_eq!(new.quantity, old.quantity);
                assert_eq!(new.date, old.date);
            } else {
                assert_eq!(old, new);
            }
        }

        // No inventory effect
        assert_eq!(db.books().list().await.unwrap(), books_before);
    }

    #[tokio::test]
    async fn test_amend_rejects_negative_discount() {
        let db = seeded_db().await;

        let err = db.ledger().amend_discount(1, -10).await.unwrap_err();
        assert!(matches!(err, LedgerError::Core(CoreError::InvalidDiscount(_))));

        let stored = db.sales().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.discount, 100);
        assert_eq!(stored.total, 1100);
    }

    #[tokio::test]
    async fn test_amend_unknown_sale() {
        let db = seeded_db().await;

        let err = db.ledger().amend_discount(99, 10).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::NotFound { entity: "Sale", .. })
        ));

        // Existence is checked before the discount
        let err = db.ledger().amend_discount(99, -10).await.unwrap_err();
        assert!(matches!(err, LedgerError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_amend_uses_current_price() {
        let db = seeded_db().await;
        db.books().update_price("B001", 700).await.unwrap();

        // Sale 1: two copies of B001
        let total = db.ledger().amend_discount(1, 100).await.unwrap();
        assert_eq!(total, Money::new(1300));
    }

    #[tokio::test]
    async fn test_amend_discount_at_position() {
        let db = seeded_db().await;
        let ledger = db.ledger();

        let (sid, total) = ledger.amend_discount_at(4, 50).await.unwrap();
        assert_eq!(sid, 4);
        assert_eq!(total, Money::new(550));

        for position in [0, 5] {
            let err = ledger.amend_discount_at(position, 50).await.unwrap_err();
            assert!(matches!(err, LedgerError::Core(CoreError::InvalidSelection(_))));
        }
    }

    #[tokio::test]
    async fn test_new_sale_appears_last_in_listings() {
        let db = seeded_db().await;
        let ledger = db.ledger();

        let sid = ledger
            .create_sale(&NewSale::new("2024-02-01", "M002", "B002", 1, 0))
            .await
            .unwrap();

        let rows = ledger.list_sales().await.unwrap();
        let last = rows.last().unwrap();
        assert_eq!(last.sale_id, sid);
        assert_eq!(last.member_name, "Bob");
        assert_eq!(last.book_title, "Data Science Basics");
        assert_eq!(last.total, 800);
        assert_eq!(last.gross(), Money::new(800));

        let brief = ledger.list_sales_brief().await.unwrap();
        assert_eq!(brief.len(), rows.len());
        assert_eq!(brief.last().unwrap().sale_id, sid);
    }
}
