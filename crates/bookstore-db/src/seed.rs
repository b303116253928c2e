//! # Default Rows
//!
//! The members, books and sales a fresh bookstore database starts with.
//!
//! ```text
//! member  M001 Alice   M002 Bob   M003 Cathy
//! book    B001 600×50  B002 800×30  B003 1200×20
//! sale    1..=4 (explicit IDs, AUTOINCREMENT continues at 5)
//! ```
//!
//! Every row goes in with `INSERT OR IGNORE` inside one transaction, so
//! seeding an already-seeded database writes nothing and existing rows
//! (including stock moved by later sales) are never overwritten.

use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{book, member, sale};
use bookstore_core::{Book, Member, Sale};

/// How many default rows one seeding run actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub members_inserted: u64,
    pub books_inserted: u64,
    pub sales_inserted: u64,
}

impl SeedSummary {
    /// True when the run wrote nothing (database was already seeded).
    pub fn is_empty(&self) -> bool {
        self.members_inserted == 0 && self.books_inserted == 0 && self.sales_inserted == 0
    }
}

fn member_row(id: &str, name: &str, phone: &str, email: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(email.to_string()),
    }
}

fn book_row(id: &str, title: &str, price: i64, stock: i64) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        price,
        stock,
    }
}

fn sale_row(id: i64, date: &str, member_id: &str, book_id: &str, quantity: i64, discount: i64, total: i64) -> Sale {
    Sale {
        id,
        date: date.to_string(),
        member_id: member_id.to_string(),
        book_id: book_id.to_string(),
        quantity,
        discount,
        total,
    }
}

/// Default members.
pub fn default_members() -> Vec<Member> {
    vec![
        member_row("M001", "Alice", "0912-345678", "alice@example.com"),
        member_row("M002", "Bob", "0923-456789", "bob@example.com"),
        member_row("M003", "Cathy", "0934-567890", "cathy@example.com"),
    ]
}

/// Default books.
pub fn default_books() -> Vec<Book> {
    vec![
        book_row("B001", "Python Programming", 600, 50),
        book_row("B002", "Data Science Basics", 800, 30),
        book_row("B003", "Machine Learning Guide", 1200, 20),
    ]
}

/// Default sales. Their totals follow `price × quantity − discount` at the
/// default prices; the default stock figures already account for them.
pub fn default_sales() -> Vec<Sale> {
    vec![
        sale_row(1, "2024-01-15", "M001", "B001", 2, 100, 1100),
        sale_row(2, "2024-01-16", "M002", "B002", 1, 50, 750),
        sale_row(3, "2024-01-17", "M001", "B003", 3, 200, 3400),
        sale_row(4, "2024-01-18", "M003", "B001", 1, 0, 600),
    ]
}

/// Inserts the default rows that are missing. Idempotent.
pub async fn seed_defaults(db: &Database) -> DbResult<SeedSummary> {
    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| DbError::transaction("begin", e))?;

    match insert_defaults(&mut *tx).await {
        Ok(summary) => {
            tx.commit()
                .await
                .map_err(|e| DbError::transaction("commit", e))?;
            info!(
                members = summary.members_inserted,
                books = summary.books_inserted,
                sales = summary.sales_inserted,
                "Default rows seeded"
            );
            Ok(summary)
        }
        Err(err) => {
            warn!(error = %err, "Seeding failed, rolling back");
            if let Err(e) = tx.rollback().await {
                warn!(error = %e, "Rollback failed");
            }
            Err(err)
        }
    }
}

async fn insert_defaults(conn: &mut SqliteConnection) -> DbResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for row in default_members() {
        if member::insert_or_ignore(conn, &row).await? {
            summary.members_inserted += 1;
        }
    }

    for row in default_books() {
        if book::insert_or_ignore(conn, &row).await? {
            summary.books_inserted += 1;
        }
    }

    for row in default_sales() {
        if sale::insert_or_ignore(conn, &row).await? {
            summary.sales_inserted += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use bookstore_core::ledger::sale_total;
    use bookstore_core::Money;

    #[test]
    fn test_default_sale_totals_match_formula() {
        let books = default_books();
        for s in default_sales() {
            let book = books.iter().find(|b| b.id == s.book_id).unwrap();
            let expected = sale_total(book.unit_price(), s.quantity, Money::new(s.discount)).unwrap();
            assert_eq!(expected.units(), s.total, "sale {}", s.id);
        }
    }

    #[tokio::test]
    async fn test_seed_fresh_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = seed_defaults(&db).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                members_inserted: 3,
                books_inserted: 3,
                sales_inserted: 4,
            }
        );

        assert_eq!(db.members().count().await.unwrap(), 3);
        assert_eq!(db.books().count().await.unwrap(), 3);
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seeding_twice_is_a_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_defaults(&db).await.unwrap();
        let first = db.sales().list().await.unwrap();

        let summary = seed_defaults(&db).await.unwrap();
        assert!(summary.is_empty());

        assert_eq!(db.members().count().await.unwrap(), 3);
        assert_eq!(db.books().count().await.unwrap(), 3);
        assert_eq!(db.sales().list().await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_reseed_keeps_moved_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_defaults(&db).await.unwrap();

        db.ledger()
            .create_sale(&bookstore_core::NewSale::new("2024-02-01", "M001", "B001", 2, 0))
            .await
            .unwrap();
        seed_defaults(&db).await.unwrap();

        let book = db.books().get_by_id("B001").await.unwrap().unwrap();
        assert_eq!(book.stock, 48);
        assert_eq!(db.sales().count().await.unwrap(), 5);
    }

    #[test]
    fn test_summary_serializes_for_reporting() {
        let summary = SeedSummary {
            members_inserted: 3,
            books_inserted: 0,
            sales_inserted: 4,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["members_inserted"], 3);
        assert_eq!(json["books_inserted"], 0);
    }
}
