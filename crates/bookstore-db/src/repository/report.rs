//! # Report Repository
//!
//! Read-only projections joining sale, member and book.
//!
//! ```text
//! sale s ──JOIN── member m ON s.mid = m.mid
//!        └─JOIN── book   b ON s.bid = b.bid
//! ORDER BY s.sid
//! ```
//!
//! Both listings use the same joins, so a 1-indexed position in
//! [`ReportRepository::list_sales_brief`] points at the same sale as the same
//! position in [`ReportRepository::list_sales`]. Nothing here writes; calling
//! either method twice without intervening writes returns identical rows.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bookstore_core::{SaleBrief, SaleView};

/// Report projector.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Full sale report, ordered by sale ID.
    pub async fn list_sales(&self) -> DbResult<Vec<SaleView>> {
        let rows = sqlx::query_as::<_, SaleView>(
            r#"
            SELECT s.sid, s.sdate, m.mname, b.btitle, b.bprice, s.sqty, s.sdiscount, s.stotal
            FROM sale s
            JOIN member m ON s.mid = m.mid
            JOIN book b ON s.bid = b.bid
            ORDER BY s.sid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed sales");
        Ok(rows)
    }

    /// Picker listing: sale ID, member name and date, ordered by sale ID.
    pub async fn list_sales_brief(&self) -> DbResult<Vec<SaleBrief>> {
        let rows = sqlx::query_as::<_, SaleBrief>(
            r#"
            SELECT s.sid, m.mname, s.sdate
            FROM sale s
            JOIN member m ON s.mid = m.mid
            JOIN book b ON s.bid = b.bid
            ORDER BY s.sid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::seeded_db;

    #[tokio::test]
    async fn test_list_sales_joins_and_orders() {
        let db = seeded_db().await;
        let rows = db.reports().list_sales().await.unwrap();

        let ids: Vec<i64> = rows.iter().map(|r| r.sale_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let third = &rows[2];
        assert_eq!(third.date, "2024-01-17");
        assert_eq!(third.member_name, "Alice");
        assert_eq!(third.book_title, "Machine Learning Guide");
        assert_eq!(third.unit_price, 1200);
        assert_eq!(third.quantity, 3);
        assert_eq!(third.discount, 200);
        assert_eq!(third.total, 3400);
    }

    #[tokio::test]
    async fn test_listing_is_restartable() {
        let db = seeded_db().await;
        let reports = db.reports();

        let first = reports.list_sales().await.unwrap();
        let second = reports.list_sales().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_brief_matches_full_listing() {
        let db = seeded_db().await;
        let full = db.reports().list_sales().await.unwrap();
        let brief = db.reports().list_sales_brief().await.unwrap();

        assert_eq!(full.len(), brief.len());
        for (view, row) in full.iter().zip(&brief) {
            assert_eq!(view.sale_id, row.sale_id);
            assert_eq!(view.member_name, row.member_name);
            assert_eq!(view.date, row.date);
        }
        assert_eq!(brief[3].member_name, "Cathy");
    }

    #[tokio::test]
    async fn test_report_shows_current_price() {
        let db = seeded_db().await;
        db.books().update_price("B001", 650).await.unwrap();

        let rows = db.reports().list_sales().await.unwrap();
        let first = &rows[0];
        assert_eq!(first.unit_price, 650);
        // Stored total is untouched by the price change
        assert_eq!(first.total, 1100);
    }
}
