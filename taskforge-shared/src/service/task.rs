/// Task domain service
///
/// Validation here is thin on purpose: a title and an owner must be
/// present, and a freshly created task is always `pending` no matter what
/// the caller wanted ([`crate::models::CreateTask`] has no status field, so
/// the rule holds by construction). Status and priority membership is
/// enforced at the boundary by the typed enums.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{CreateTask, Task, TaskStatus};
use crate::repository::TaskRepository;

/// Service for tasks
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Creates a task with status forced to `pending`
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is empty or the owner id is nil
    pub async fn create_task(&self, data: CreateTask) -> Result<Task> {
        if data.title.is_empty() {
            return Err(Error::validation("task title is required"));
        }

        if data.user_id.is_nil() {
            return Err(Error::validation("user ID is required"));
        }

        let now = chrono::Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            user_id: data.user_id,
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            owner: None,
            category: None,
        };

        self.repo.create(&task).await
    }

    /// Fetches a task with its owner and category resolved
    pub async fn get_by_id(&self, id: Uuid) -> Result<Task> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_by_owner(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Task>> {
        self.repo.get_by_owner(user_id, limit, offset).await
    }

    pub async fn get_by_status(
        &self,
        user_id: Uuid,
        status: TaskStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        self.repo.get_by_status(user_id, status, limit, offset).await
    }

    pub async fn get_by_category(
        &self,
        category_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>> {
        self.repo.get_by_category(category_id, limit, offset).await
    }

    /// Overwrites the record as given; no field-level diffing at this layer
    pub async fn update_task(&self, task: &Task) -> Result<Task> {
        self.repo.update(task).await
    }

    /// Sets the status of an existing task
    ///
    /// # Errors
    ///
    /// - `NotFound` if no live task has this id
    pub async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        let mut task = self.repo.get_by_id(id).await?;
        task.status = status;
        self.repo.update(&task).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn list_tasks(&self, limit: i64, offset: i64) -> Result<Vec<Task>> {
        self.repo.list(limit, offset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use serde_json::json;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryStore::new()))
    }

    fn new_task(title: &str, user_id: Uuid) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            priority: None,
            due_date: None,
            user_id,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_task_defaults() {
        let svc = service();
        let task = svc
            .create_task(new_task("Buy milk", Uuid::new_v4()))
            .await
            .unwrap();

        assert!(!task.id.is_nil());
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, crate::models::TaskPriority::Medium);
    }

    #[tokio::test]
    async fn test_create_task_ignores_caller_supplied_status() {
        let svc = service();

        // A caller sending "status": "completed" on create gets a pending
        // task anyway; the input type has no status field to carry it
        let data: CreateTask = serde_json::from_value(json!({
            "title": "Buy milk",
            "status": "completed",
            "user_id": Uuid::new_v4(),
        }))
        .unwrap();

        let task = svc.create_task(data).await.unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_task_requires_title() {
        let svc = service();
        let err = svc
            .create_task(new_task("", Uuid::new_v4()))
            .await
            .unwrap_err();

        match err {
            Error::Validation(msg) => assert!(msg.contains("title is required")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_task_requires_owner() {
        let svc = service();
        let err = svc.create_task(new_task("Buy milk", Uuid::nil())).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_roundtrip() {
        let svc = service();
        let mut task = svc
            .create_task(new_task("Buy milk", Uuid::new_v4()))
            .await
            .unwrap();

        task.title = "Buy oat milk".to_string();
        task.priority = crate::models::TaskPriority::High;
        svc.update_task(&task).await.unwrap();

        let fetched = svc.get_by_id(task.id).await.unwrap();
        assert_eq!(fetched.title, "Buy oat milk");
        assert_eq!(fetched.priority, crate::models::TaskPriority::High);
    }

    #[tokio::test]
    async fn test_update_status() {
        let svc = service();
        let task = svc
            .create_task(new_task("Buy milk", Uuid::new_v4()))
            .await
            .unwrap();

        svc.update_status(task.id, TaskStatus::Completed).await.unwrap();

        let fetched = svc.get_by_id(task.id).await.unwrap();
        assert_eq!(fetched.status, TaskStatus::Completed);
        assert!(fetched.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_of_missing_task_is_not_found() {
        let svc = service();
        let err = svc
            .update_status(Uuid::new_v4(), TaskStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service();
        let task = svc
            .create_task(new_task("Buy milk", Uuid::new_v4()))
            .await
            .unwrap();

        svc.delete_task(task.id).await.unwrap();
        assert!(matches!(
            svc.get_by_id(task.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_get_by_status_filters() {
        let svc = service();
        let owner = Uuid::new_v4();

        let a = svc.create_task(new_task("a", owner)).await.unwrap();
        svc.create_task(new_task("b", owner)).await.unwrap();
        svc.update_status(a.id, TaskStatus::Completed).await.unwrap();

        let completed = svc
            .get_by_status(owner, TaskStatus::Completed, 10, 0)
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, a.id);

        let pending = svc
            .get_by_status(owner, TaskStatus::Pending, 10, 0)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_category_resolves_owners() {
        let store = Arc::new(MemoryStore::new());
        let svc = TaskService::new(store.clone());
        let users = crate::service::UserService::new(store);

        let alice = users
            .create_user(crate::models::CreateUser {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password: "pw123456".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap();

        let category_id = Uuid::new_v4();
        let mut data = new_task("Buy milk", alice.id);
        data.category_id = Some(category_id);
        svc.create_task(data).await.unwrap();
        svc.create_task(new_task("uncategorized", alice.id)).await.unwrap();

        let tasks = svc.get_by_category(category_id, 10, 0).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].owner.as_ref().unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_get_by_owner_is_scoped_and_paginated() {
        let svc = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        for i in 0..5 {
            svc.create_task(new_task(&format!("t{}", i), alice)).await.unwrap();
        }
        svc.create_task(new_task("other", bob)).await.unwrap();

        let page = svc.get_by_owner(alice, 3, 0).await.unwrap();
        assert_eq!(page.len(), 3);

        let rest = svc.get_by_owner(alice, 10, 3).await.unwrap();
        assert_eq!(rest.len(), 2);

        let bobs = svc.get_by_owner(bob, 10, 0).await.unwrap();
        assert_eq!(bobs.len(), 1);
    }
}
