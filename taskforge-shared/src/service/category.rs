/// Category domain service

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Category, CreateCategory};
use crate::repository::CategoryRepository;

/// Service for task categories
#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Creates a category
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is empty or the owner id is nil
    pub async fn create_category(&self, data: CreateCategory) -> Result<Category> {
        if data.name.is_empty() {
            return Err(Error::validation("category name is required"));
        }

        if data.user_id.is_nil() {
            return Err(Error::validation("user ID is required"));
        }

        let now = chrono::Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            color: data.color,
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            tasks: Vec::new(),
        };

        self.repo.create(&category).await
    }

    /// Fetches a category with its live tasks resolved
    pub async fn get_by_id(&self, id: Uuid) -> Result<Category> {
        self.repo.get_by_id(id).await
    }

    /// All live categories for a user, unpaginated
    pub async fn get_by_owner(&self, user_id: Uuid) -> Result<Vec<Category>> {
        self.repo.get_by_owner(user_id).await
    }

    /// Overwrites the record as given; no field-level diffing at this layer
    pub async fn update_category(&self, category: &Category) -> Result<Category> {
        self.repo.update(category).await
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn list_categories(&self, limit: i64, offset: i64) -> Result<Vec<Category>> {
        self.repo.list(limit, offset).await
    }
}
