//! User model and auth DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::DbPool;

/// A registered identity.
///
/// Passwords are stored exactly as the client supplied them, with no
/// hashing. This is a known-insecure baseline kept for compatibility;
/// see DESIGN.md before building anything on top of it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl User {
    /// Insert a new user and return the assigned id.
    ///
    /// Usernames are not checked for uniqueness: registering the same
    /// username twice yields two rows with distinct ids.
    pub async fn insert(
        pool: &DbPool,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<i64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO users (username, password, email, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(password)
        .bind(email)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Find the user matching both username and password.
    ///
    /// Plaintext equality on both columns. When duplicate usernames exist,
    /// the lowest id (earliest registration) wins.
    pub async fn find_by_credentials(
        pool: &DbPool,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM users \
             WHERE username = ? AND password = ? AND deleted_at IS NULL \
             ORDER BY id LIMIT 1",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(pool)
        .await
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // A single connection keeps every query on the same in-memory database.
    async fn test_pool() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_and_find_roundtrip() {
        let pool = test_pool().await;

        let id = User::insert(&pool, "alice", "secret", "a@x.com")
            .await
            .unwrap();

        let user = User::find_by_credentials(&pool, "alice", "secret")
            .await
            .unwrap()
            .expect("user should be found");

        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
        assert!(user.deleted_at.is_none());
        assert!(!user.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_finds_nothing() {
        let pool = test_pool().await;
        User::insert(&pool, "alice", "secret", "a@x.com")
            .await
            .unwrap();

        let miss = User::find_by_credentials(&pool, "alice", "wrong")
            .await
            .unwrap();
        assert!(miss.is_none());

        let miss = User::find_by_credentials(&pool, "nobody", "secret")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_usernames_get_distinct_ids() {
        let pool = test_pool().await;

        let first = User::insert(&pool, "alice", "one", "a@x.com")
            .await
            .unwrap();
        let second = User::insert(&pool, "alice", "two", "a@y.com")
            .await
            .unwrap();

        assert_ne!(first, second);
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_duplicate_match_resolves_to_lowest_id() {
        let pool = test_pool().await;

        let first = User::insert(&pool, "alice", "secret", "a@x.com")
            .await
            .unwrap();
        let _second = User::insert(&pool, "alice", "secret", "a@y.com")
            .await
            .unwrap();

        let user = User::find_by_credentials(&pool, "alice", "secret")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, first);
    }

    #[tokio::test]
    async fn test_soft_deleted_users_are_excluded() {
        let pool = test_pool().await;
        let id = User::insert(&pool, "alice", "secret", "a@x.com")
            .await
            .unwrap();

        sqlx::query("UPDATE users SET deleted_at = ? WHERE id = ?")
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();

        let miss = User::find_by_credentials(&pool, "alice", "secret")
            .await
            .unwrap();
        assert!(miss.is_none());
    }
}
