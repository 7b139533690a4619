/// Category persistence accessor

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Category, Task};

const CATEGORY_COLUMNS: &str =
    "id, name, description, color, user_id, created_at, updated_at, deleted_at";

/// Storage operations for [`Category`] records
///
/// All reads exclude soft-deleted rows. `get_by_owner` is deliberately
/// unpaginated; users hold at most a handful of categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persists a fully-populated category record
    async fn create(&self, category: &Category) -> Result<Category>;

    /// Fetches a live category with its live tasks resolved;
    /// `NotFound` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<Category>;

    /// Lists all of a user's live categories
    async fn get_by_owner(&self, user_id: Uuid) -> Result<Vec<Category>>;

    /// Overwrites the record as given, refreshing `updated_at`
    async fn update(&self, category: &Category) -> Result<Category>;

    /// Marks the record soft-deleted; `NotFound` if no live row matched
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Lists live categories in creation order
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>>;
}

/// Postgres-backed [`CategoryRepository`]
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category> {
        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (id, name, description, color, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.color)
        .bind(category.user_id)
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Category> {
        let mut category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("category not found"))?;

        category.tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, priority, due_date, user_id, category_id, \
                    created_at, updated_at, deleted_at \
             FROM tasks WHERE category_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(category)
    }

    async fn get_by_owner(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE user_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories \
             SET name = $2, description = $3, color = $4, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.color)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("category not found"))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("category not found"));
        }
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE deleted_at IS NULL \
             ORDER BY created_at LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
