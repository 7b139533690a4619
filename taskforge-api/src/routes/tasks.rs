/// Task endpoints
///
/// Writes require an identified owner via the `x-user-id` header (see
/// [`crate::middleware::identity::OwnerId`]).
///
/// # Endpoints
///
/// - `POST   /api/v1/tasks` - Create a task (status always starts pending)
/// - `GET    /api/v1/tasks` - Owner's tasks, optional `?status=` filter
/// - `GET    /api/v1/tasks/:id` - Fetch a task with owner and category
/// - `PUT    /api/v1/tasks/:id` - Partial update
/// - `PATCH  /api/v1/tasks/:id/status` - Set status
/// - `DELETE /api/v1/tasks/:id` - Soft-delete
///
/// # Partial updates
///
/// A `PUT` overwrites a field only if the incoming value is a non-empty
/// string or a present optional. A field therefore cannot be reset to
/// empty through this path, only replaced.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskforge_shared::models::{CreateTask, Task, TaskPriority, TaskStatus};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::identity::OwnerId,
    routes::Pagination,
};

/// Create task request
///
/// There is no status field: tasks always start out `pending`. An unknown
/// status key in the payload is ignored by deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,

    pub category_id: Option<Uuid>,
}

/// Partial task update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Task list query parameters
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// Optional status filter; an unknown value is a 400
    pub status: Option<String>,

    #[serde(default = "super::default_limit")]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

/// Single-task response envelope
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

/// Task list response envelope
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a new task for the identified owner
///
/// # Errors
///
/// - `400 Bad Request`: Missing title
/// - `401 Unauthorized`: No identified owner
pub async fn create_task(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = state
        .tasks
        .create_task(CreateTask {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            user_id,
            category_id: req.category_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Fetch a task by id, with owner and category resolved
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.get_by_id(id).await?;
    Ok(Json(TaskResponse { task }))
}

/// List the identified owner's tasks, optionally filtered by status
pub async fn list_tasks(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<TasksResponse>> {
    let pagination = Pagination {
        limit: query.limit,
        offset: query.offset,
    };
    pagination.validate()?;

    let tasks = match query.status.as_deref() {
        Some(status) => {
            let status: TaskStatus = status.parse().map_err(ApiError::BadRequest)?;
            state
                .tasks
                .get_by_status(user_id, status, query.limit, query.offset)
                .await?
        }
        None => {
            state
                .tasks
                .get_by_owner(user_id, query.limit, query.offset)
                .await?
        }
    };

    Ok(Json(TasksResponse { tasks }))
}

/// Partially update a task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let mut task = state.tasks.get_by_id(id).await?;

    // Non-empty strings and present optionals overwrite; anything else
    // leaves the current value in place
    if let Some(title) = req.title {
        if !title.is_empty() {
            task.title = title;
        }
    }
    if let Some(description) = req.description {
        if !description.is_empty() {
            task.description = description;
        }
    }
    if let Some(status) = req.status {
        task.status = status;
    }
    if let Some(priority) = req.priority {
        task.priority = priority;
    }
    if let Some(due_date) = req.due_date {
        task.due_date = Some(due_date);
    }
    if let Some(category_id) = req.category_id {
        task.category_id = Some(category_id);
    }

    let task = state.tasks.update_task(&task).await?;
    Ok(Json(TaskResponse { task }))
}

/// Set a task's status
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.update_status(id, req.status).await?;
    Ok(Json(TaskResponse { task }))
}

/// Soft-delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.tasks.delete_task(id).await?;
    Ok(Json(MessageResponse {
        message: "task deleted successfully".to_string(),
    }))
}
