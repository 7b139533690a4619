/// Task persistence accessor
///
/// Detail reads resolve the owning user and category alongside the task
/// (the `owner`/`category` fields on [`Task`]); list reads resolve whichever
/// side the caller filtered away, batched with `= ANY(...)` rather than one
/// query per row.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Category, Task, TaskStatus, User};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, user_id, \
                            category_id, created_at, updated_at, deleted_at";

/// Storage operations for [`Task`] records
///
/// All reads exclude soft-deleted rows; lists are paginated with
/// limit/offset in creation order.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a fully-populated task record
    async fn create(&self, task: &Task) -> Result<Task>;

    /// Fetches a live task with its owner and category resolved;
    /// `NotFound` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<Task>;

    /// Lists a user's live tasks with categories resolved
    async fn get_by_owner(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Task>>;

    /// Lists a user's live tasks in the given status, categories resolved
    async fn get_by_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>>;

    /// Lists live tasks in a category with owners resolved
    async fn get_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>>;

    /// Overwrites the record as given, refreshing `updated_at`
    async fn update(&self, task: &Task) -> Result<Task>;

    /// Marks the record soft-deleted; `NotFound` if no live row matched
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Lists all live tasks with owners and categories resolved
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Task>>;
}

/// Postgres-backed [`TaskRepository`]
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves `category` for each task in one batched query
    async fn attach_categories(&self, tasks: &mut [Task]) -> Result<()> {
        let ids: Vec<Uuid> = tasks.iter().filter_map(|t| t.category_id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, color, user_id, created_at, updated_at, deleted_at \
             FROM categories WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<Uuid, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();

        for task in tasks.iter_mut() {
            task.category = task.category_id.and_then(|id| by_id.get(&id).cloned());
        }
        Ok(())
    }

    /// Resolves `owner` for each task in one batched query
    async fn attach_owners(&self, tasks: &mut [Task]) -> Result<()> {
        let ids: Vec<Uuid> = tasks.iter().map(|t| t.user_id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, first_name, last_name, \
                    created_at, updated_at, deleted_at \
             FROM users WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<Uuid, User> = users.into_iter().map(|u| (u.id, u)).collect();

        for task in tasks.iter_mut() {
            task.owner = by_id.get(&task.user_id).cloned();
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, title, description, status, priority, due_date, user_id, \
                                category_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(task.user_id)
        .bind(task.category_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("task not found"))?;

        let mut tasks = [task];
        self.attach_owners(&mut tasks).await?;
        self.attach_categories(&mut tasks).await?;
        let [task] = tasks;
        Ok(task)
    }

    async fn get_by_owner(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Task>> {
        let mut tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE user_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_categories(&mut tasks).await?;
        Ok(tasks)
    }

    async fn get_by_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        let mut tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE user_id = $1 AND status = $2 AND deleted_at IS NULL \
             ORDER BY created_at LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_categories(&mut tasks).await?;
        Ok(tasks)
    }

    async fn get_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        let mut tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE category_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at LIMIT $2 OFFSET $3"
        ))
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_owners(&mut tasks).await?;
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $2, description = $3, status = $4, priority = $5, due_date = $6, \
                 category_id = $7, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(task.category_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("task not found"))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("task not found"));
        }
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Task>> {
        let mut tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE deleted_at IS NULL \
             ORDER BY created_at LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_owners(&mut tasks).await?;
        self.attach_categories(&mut tasks).await?;
        Ok(tasks)
    }
}
