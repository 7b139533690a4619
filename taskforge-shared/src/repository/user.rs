/// User persistence accessor
///
/// # Example
///
/// ```no_run
/// use taskforge_shared::repository::{PgUserRepository, UserRepository};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> taskforge_shared::error::Result<()> {
/// let repo = PgUserRepository::new(pool);
/// let users = repo.list(10, 0).await?;
/// println!("{} users", users.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                            created_at, updated_at, deleted_at";

/// Storage operations for [`User`] records
///
/// All reads exclude soft-deleted rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a fully-populated user record
    async fn create(&self, user: &User) -> Result<User>;

    /// Fetches a live user by id; `NotFound` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<User>;

    /// Fetches a live user by email; `NotFound` if absent
    async fn get_by_email(&self, email: &str) -> Result<User>;

    /// Fetches a live user by username; `NotFound` if absent
    async fn get_by_username(&self, username: &str) -> Result<User>;

    /// Overwrites the record as given, refreshing `updated_at`
    async fn update(&self, user: &User) -> Result<User>;

    /// Marks the record soft-deleted; `NotFound` if no live row matched
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Lists live users in creation order
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>>;
}

/// Postgres-backed [`UserRepository`]
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, email, password_hash, first_name, last_name, \
                                created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn get_by_email(&self, email: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn get_by_username(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn update(&self, user: &User) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET username = $2, email = $3, password_hash = $4, first_name = $5, \
                 last_name = $6, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("user not found"));
        }
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL \
             ORDER BY created_at LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
