//! # Sale Repository
//!
//! Row-level database operations for sales. The rules around them (validation,
//! stock, atomicity) live in [`crate::ledger`].
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE (SaleLedger::create_sale, one transaction)                  │
//! │     └── book stock decremented                                         │
//! │     └── insert() → sid assigned by AUTOINCREMENT                       │
//! │                                                                         │
//! │  2. (OPTIONAL, repeatable) AMEND DISCOUNT                              │
//! │     └── pricing() → quantity + current book price                      │
//! │     └── update_discount() → sdiscount, stotal                          │
//! │                                                                         │
//! │  Date, member, book and quantity never change after step 1.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookstore_core::{Money, NewSale, Sale, SaleId};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: SaleId) -> DbResult<Option<Sale>> {
        let mut conn = self.pool.acquire().await?;
        find(&mut conn, id).await
    }

    /// Lists raw sale rows ordered by ID.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT sid, sdate, mid, bid, sqty, sdiscount, stotal
            FROM sale
            ORDER BY sid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// What an amendment needs to recompute a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub(crate) struct SalePricing {
    #[sqlx(rename = "sqty")]
    pub quantity: i64,

    /// The book's price now, not at the time of sale.
    #[sqlx(rename = "bprice")]
    pub unit_price: i64,
}

pub(crate) async fn find(conn: &mut SqliteConnection, id: SaleId) -> DbResult<Option<Sale>> {
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        SELECT sid, sdate, mid, bid, sqty, sdiscount, stotal
        FROM sale
        WHERE sid = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(sale)
}

/// Inserts a new sale row and returns its auto-assigned ID.
pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    sale: &NewSale,
    total: Money,
) -> DbResult<SaleId> {
    debug!(mid = %sale.member_id, bid = %sale.book_id, qty = sale.quantity, "Inserting sale");

    let result = sqlx::query(
        r#"
        INSERT INTO sale (sdate, mid, bid, sqty, sdiscount, stotal)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&sale.date)
    .bind(&sale.member_id)
    .bind(&sale.book_id)
    .bind(sale.quantity)
    .bind(sale.discount)
    .bind(total.units())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Inserts a sale with an explicit ID unless that ID already exists.
pub(crate) async fn insert_or_ignore(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<bool> {
    debug!(sid = sale.id, "Inserting sale (or ignore)");

    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO sale (sid, sdate, mid, bid, sqty, sdiscount, stotal)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(sale.id)
    .bind(&sale.date)
    .bind(&sale.member_id)
    .bind(&sale.book_id)
    .bind(sale.quantity)
    .bind(sale.discount)
    .bind(sale.total)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Loads the stored quantity and the book's current price for a sale.
///
/// `None` when the sale (or its book) does not exist.
pub(crate) async fn pricing(conn: &mut SqliteConnection, id: SaleId) -> DbResult<Option<SalePricing>> {
    let pricing = sqlx::query_as::<_, SalePricing>(
        r#"
        SELECT s.sqty, b.bprice
        FROM sale s
        JOIN book b ON s.bid = b.bid
        WHERE s.sid = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(pricing)
}

/// Rewrites discount and total of one sale. Nothing else changes.
pub(crate) async fn update_discount(
    conn: &mut SqliteConnection,
    id: SaleId,
    discount: i64,
    total: Money,
) -> DbResult<()> {
    debug!(sid = id, discount = discount, total = %total, "Updating sale discount");

    let result = sqlx::query(
        r#"
        UPDATE sale SET
            sdiscount = ?2,
            stotal = ?3
        WHERE sid = ?1
        "#,
    )
    .bind(id)
    .bind(discount)
    .bind(total.units())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Sale", id.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_db;

    #[tokio::test]
    async fn test_get_and_list() {
        let db = seeded_db().await;
        let repo = db.sales();

        let sale = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(sale.member_id, "M001");
        assert_eq!(sale.book_id, "B003");
        assert_eq!(sale.total, 3400);

        assert!(repo.get_by_id(99).await.unwrap().is_none());
        assert_eq!(repo.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_pricing_joins_current_price() {
        let db = seeded_db().await;
        db.books().update_price("B003", 1000).await.unwrap();

        let mut conn = db.pool().acquire().await.unwrap();
        let found = pricing(&mut conn, 3).await.unwrap().unwrap();
        assert_eq!(found, SalePricing { quantity: 3, unit_price: 1000 });
        assert!(pricing(&mut conn, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_discount_missing_sale() {
        let db = seeded_db().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let err = update_discount(&mut conn, 99, 10, Money::new(0)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
