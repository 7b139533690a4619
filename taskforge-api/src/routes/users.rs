/// User account endpoints
///
/// # Endpoints
///
/// - `POST   /api/v1/users` - Register a new user
/// - `GET    /api/v1/users` - List users (paginated)
/// - `GET    /api/v1/users/:id` - Fetch a user
/// - `PUT    /api/v1/users/:id` - Update profile (name fields only)
/// - `DELETE /api/v1/users/:id` - Soft-delete a user
///
/// The password hash never appears in a response; the model skips it on
/// serialization.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskforge_shared::models::{CreateUser, User};
use uuid::Uuid;
use validator::Validate;

use crate::{app::AppState, error::ApiResult, routes::Pagination};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Desired username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,
}

/// Profile update request
///
/// Only the name fields are mutable through this surface; username, email,
/// and password are not updatable here.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,
}

/// Single-user response envelope
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// User list response envelope
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: Payload validation failed
/// - `409 Conflict`: Email or username already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = state
        .users
        .create_user(CreateUser {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Fetch a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(UserResponse { user }))
}

/// Update a user's profile
///
/// Fetches the current record, merges the mutable fields, and persists the
/// result; everything else is carried over untouched.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let mut user = state.users.get_by_id(id).await?;

    user.first_name = req.first_name;
    user.last_name = req.last_name;

    let user = state.users.update_user(&user).await?;
    Ok(Json(UserResponse { user }))
}

/// Soft-delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.users.delete_user(id).await?;
    Ok(Json(MessageResponse {
        message: "user deleted successfully".to_string(),
    }))
}

/// List users with pagination
pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<UsersResponse>> {
    pagination.validate()?;

    let users = state
        .users
        .list_users(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(UsersResponse { users }))
}
