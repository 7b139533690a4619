/// In-memory store implementing every repository trait
///
/// A single locked state stands in for the database, so the three accessors
/// share one view of the world exactly as the Postgres backends do. Used by
/// the service unit tests and the API integration tests; also handy for
/// local development without a database.
///
/// Behavior deliberately mirrors the Postgres backends: reads exclude
/// soft-deleted rows, user create enforces the live-row uniqueness of email
/// and username, lists come back in insertion (= creation) order, and a
/// second delete of the same id reports `NotFound`.
///
/// # Example
///
/// ```
/// use taskforge_shared::repository::{MemoryStore, UserRepository};
///
/// # async fn example() -> taskforge_shared::error::Result<()> {
/// let store = MemoryStore::new();
/// let users = UserRepository::list(&store, 10, 0).await?;
/// assert!(users.is_empty());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Category, Task, TaskStatus, User};

use super::{CategoryRepository, TaskRepository, UserRepository};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

/// Shared in-process store; cheap to clone, all clones see the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T: Clone>(items: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    items.skip(offset).take(limit).collect()
}

impl Inner {
    fn live_user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id && u.deleted_at.is_none())
    }

    fn live_category(&self, id: Uuid) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id && c.deleted_at.is_none())
    }

    fn resolve_task(&self, task: &Task) -> Task {
        let mut task = task.clone();
        task.owner = self.live_user(task.user_id).cloned();
        task.category = task.category_id.and_then(|id| self.live_category(id).cloned());
        task
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<User> {
        let mut inner = self.inner.write().unwrap();

        // Mirror of the partial unique indexes on the users table
        if inner
            .users
            .iter()
            .any(|u| u.deleted_at.is_none() && u.email == user.email)
        {
            return Err(Error::Conflict(
                "user with this email already exists".to_string(),
            ));
        }
        if inner
            .users
            .iter()
            .any(|u| u.deleted_at.is_none() && u.username == user.username)
        {
            return Err(Error::Conflict(
                "user with this username already exists".to_string(),
            ));
        }

        inner.users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let inner = self.inner.read().unwrap();
        inner
            .live_user(id)
            .cloned()
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn get_by_email(&self, email: &str) -> Result<User> {
        let inner = self.inner.read().unwrap();
        inner
            .users
            .iter()
            .find(|u| u.deleted_at.is_none() && u.email == email)
            .cloned()
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn get_by_username(&self, username: &str) -> Result<User> {
        let inner = self.inner.read().unwrap();
        inner
            .users
            .iter()
            .find(|u| u.deleted_at.is_none() && u.username == username)
            .cloned()
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .users
            .iter_mut()
            .find(|u| u.id == user.id && u.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("user not found"))?;

        let mut updated = user.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("user not found"))?;

        existing.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let inner = self.inner.read().unwrap();
        Ok(paginate(
            inner.users.iter().filter(|u| u.deleted_at.is_none()).cloned(),
            limit,
            offset,
        ))
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn create(&self, task: &Task) -> Result<Task> {
        let mut inner = self.inner.write().unwrap();
        inner.tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Task> {
        let inner = self.inner.read().unwrap();
        inner
            .tasks
            .iter()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .map(|t| inner.resolve_task(t))
            .ok_or_else(|| Error::not_found("task not found"))
    }

    async fn get_by_owner(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Task>> {
        let inner = self.inner.read().unwrap();
        let mut tasks = paginate(
            inner
                .tasks
                .iter()
                .filter(|t| t.deleted_at.is_none() && t.user_id == user_id)
                .cloned(),
            limit,
            offset,
        );
        for task in tasks.iter_mut() {
            task.category = task.category_id.and_then(|id| inner.live_category(id).cloned());
        }
        Ok(tasks)
    }

    async fn get_by_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        let inner = self.inner.read().unwrap();
        let mut tasks = paginate(
            inner
                .tasks
                .iter()
                .filter(|t| {
                    t.deleted_at.is_none() && t.user_id == user_id && t.status == status
                })
                .cloned(),
            limit,
            offset,
        );
        for task in tasks.iter_mut() {
            task.category = task.category_id.and_then(|id| inner.live_category(id).cloned());
        }
        Ok(tasks)
    }

    async fn get_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        let inner = self.inner.read().unwrap();
        let mut tasks = paginate(
            inner
                .tasks
                .iter()
                .filter(|t| t.deleted_at.is_none() && t.category_id == Some(category_id))
                .cloned(),
            limit,
            offset,
        );
        for task in tasks.iter_mut() {
            task.owner = inner.live_user(task.user_id).cloned();
        }
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("task not found"))?;

        let mut updated = task.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        updated.owner = None;
        updated.category = None;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("task not found"))?;

        existing.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Task>> {
        let inner = self.inner.read().unwrap();
        let tasks = paginate(
            inner.tasks.iter().filter(|t| t.deleted_at.is_none()),
            limit,
            offset,
        );
        Ok(tasks.into_iter().map(|t| inner.resolve_task(t)).collect())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, category: &Category) -> Result<Category> {
        let mut inner = self.inner.write().unwrap();
        inner.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Category> {
        let inner = self.inner.read().unwrap();
        let mut category = inner
            .live_category(id)
            .cloned()
            .ok_or_else(|| Error::not_found("category not found"))?;

        category.tasks = inner
            .tasks
            .iter()
            .filter(|t| t.deleted_at.is_none() && t.category_id == Some(id))
            .cloned()
            .collect();
        Ok(category)
    }

    async fn get_by_owner(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .categories
            .iter()
            .filter(|c| c.deleted_at.is_none() && c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .categories
            .iter_mut()
            .find(|c| c.id == category.id && c.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("category not found"))?;

        let mut updated = category.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        updated.tasks = Vec::new();
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let existing = inner
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.deleted_at.is_none())
            .ok_or_else(|| Error::not_found("category not found"))?;

        existing.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Category>> {
        let inner = self.inner.read().unwrap();
        Ok(paginate(
            inner
                .categories
                .iter()
                .filter(|c| c.deleted_at.is_none())
                .cloned(),
            limit,
            offset,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_user(username: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_enforces_live_email_uniqueness() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &make_user("alice", "a@x.com"))
            .await
            .unwrap();

        let err = UserRepository::create(&store, &make_user("bob", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_deleted_user_frees_username_and_email() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, &make_user("alice", "a@x.com"))
            .await
            .unwrap();
        UserRepository::delete(&store, alice.id).await.unwrap();

        // Uniqueness is scoped to live rows only
        UserRepository::create(&store, &make_user("alice", "a@x.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_second_delete_reports_not_found() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, &make_user("alice", "a@x.com"))
            .await
            .unwrap();

        UserRepository::delete(&store, alice.id).await.unwrap();
        let err = UserRepository::delete(&store, alice.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let store = MemoryStore::new();
        for i in 0..3 {
            let user = make_user(&format!("user{}", i), &format!("u{}@x.com", i));
            UserRepository::create(&store, &user).await.unwrap();
        }

        let users = UserRepository::list(&store, 10, 0).await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["user0", "user1", "user2"]);
    }
}
