/// Category endpoints
///
/// # Endpoints
///
/// - `POST   /api/v1/categories` - Create a category
/// - `GET    /api/v1/categories` - Owner's categories (unpaginated)
/// - `GET    /api/v1/categories/:id` - Fetch a category with its live tasks
/// - `PUT    /api/v1/categories/:id` - Partial update
/// - `DELETE /api/v1/categories/:id` - Soft-delete
///
/// Deleting a category does not touch its tasks; they keep the stale
/// `category_id` and their association simply resolves to nothing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskforge_shared::models::{Category, CreateCategory};
use uuid::Uuid;
use validator::Validate;

use crate::{app::AppState, error::ApiResult, middleware::identity::OwnerId};

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub color: String,
}

/// Partial category update request
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Single-category response envelope
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
}

/// Category list response envelope
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a new category for the identified owner
///
/// # Errors
///
/// - `400 Bad Request`: Missing name
/// - `401 Unauthorized`: No identified owner
pub async fn create_category(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    req.validate()?;

    let category = state
        .categories
        .create_category(CreateCategory {
            name: req.name,
            description: req.description,
            color: req.color,
            user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// Fetch a category by id, with its live tasks resolved
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state.categories.get_by_id(id).await?;
    Ok(Json(CategoryResponse { category }))
}

/// List the identified owner's categories
pub async fn list_categories(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.categories.get_by_owner(user_id).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Partially update a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let mut category = state.categories.get_by_id(id).await?;

    // Only non-empty values overwrite; a field cannot be reset to empty
    // through this path
    if let Some(name) = req.name {
        if !name.is_empty() {
            category.name = name;
        }
    }
    if let Some(description) = req.description {
        if !description.is_empty() {
            category.description = description;
        }
    }
    if let Some(color) = req.color {
        if !color.is_empty() {
            category.color = color;
        }
    }

    let category = state.categories.update_category(&category).await?;
    Ok(Json(CategoryResponse { category }))
}

/// Soft-delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.categories.delete_category(id).await?;
    Ok(Json(MessageResponse {
        message: "category deleted successfully".to_string(),
    }))
}
