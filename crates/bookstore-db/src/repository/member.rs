//! # Member Repository
//!
//! Point lookups and seeding inserts for members. Members are never updated
//! or deleted by this crate.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bookstore_core::Member;

/// Repository for member database operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    /// Creates a new MemberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberRepository { pool }
    }

    /// Gets a member by key.
    ///
    /// ## Returns
    /// * `Ok(Some(Member))` - Member found
    /// * `Ok(None)` - Member not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Member>> {
        let mut conn = self.pool.acquire().await?;
        find(&mut conn, id).await
    }

    /// Inserts a member unless the key already exists.
    ///
    /// ## Returns
    /// `true` if a row was written, `false` if the key was already taken.
    pub async fn insert_or_ignore(&self, member: &Member) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        insert_or_ignore(&mut conn, member).await
    }

    /// Counts members (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn find(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(
        r#"
        SELECT mid, mname, mphone, memail
        FROM member
        WHERE mid = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(member)
}

pub(crate) async fn insert_or_ignore(conn: &mut SqliteConnection, member: &Member) -> DbResult<bool> {
    debug!(mid = %member.id, "Inserting member (or ignore)");

    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO member (mid, mname, mphone, memail)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&member.id)
    .bind(&member.name)
    .bind(&member.phone)
    .bind(&member.email)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use bookstore_core::Member;

    fn member(id: &str, name: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            phone: "0955-111222".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.members();

        assert!(repo.insert_or_ignore(&member("M010", "Erin")).await.unwrap());

        let found = repo.get_by_id("M010").await.unwrap().unwrap();
        assert_eq!(found.name, "Erin");
        assert_eq!(found.email, None);

        assert!(repo.get_by_id("M404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_key_is_ignored() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.members();

        assert!(repo.insert_or_ignore(&member("M010", "Erin")).await.unwrap());
        assert!(!repo.insert_or_ignore(&member("M010", "Someone Else")).await.unwrap());

        let found = repo.get_by_id("M010").await.unwrap().unwrap();
        assert_eq!(found.name, "Erin");
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
