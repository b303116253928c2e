//! # Book Repository
//!
//! Database operations for books.
//!
//! ## Key Operations
//! - Point lookup by key
//! - Seeding inserts (insert-or-ignore)
//! - Price updates
//!
//! Stock is deliberately absent from the write API here: only the inventory
//! guard ([`crate::inventory`]) changes `bstock`, and only inside a sale
//! transaction.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookstore_core::Book;

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.books();
/// let book = repo.get_by_id("B001").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by key.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let mut conn = self.pool.acquire().await?;
        find(&mut conn, id).await
    }

    /// Lists all books ordered by key.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT bid, btitle, bprice, bstock
            FROM book
            ORDER BY bid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Inserts a book unless the key already exists.
    ///
    /// ## Returns
    /// `true` if a row was written, `false` if the key was already taken.
    pub async fn insert_or_ignore(&self, book: &Book) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        insert_or_ignore(&mut conn, book).await
    }

    /// Changes a book's unit price.
    ///
    /// Recorded sales keep their totals. A later discount amendment on one
    /// of them recomputes from the new price.
    pub async fn update_price(&self, id: &str, price: i64) -> DbResult<()> {
        debug!(bid = %id, price = %price, "Updating price");

        let result = sqlx::query("UPDATE book SET bprice = ?2 WHERE bid = ?1")
            .bind(id)
            .bind(price)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    /// Counts books (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn find(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        SELECT bid, btitle, bprice, bstock
        FROM book
        WHERE bid = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(book)
}

pub(crate) async fn insert_or_ignore(conn: &mut SqliteConnection, book: &Book) -> DbResult<bool> {
    debug!(bid = %book.id, "Inserting book (or ignore)");

    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO book (bid, btitle, bprice, bstock)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&book.id)
    .bind(&book.title)
    .bind(book.price)
    .bind(book.stock)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}
