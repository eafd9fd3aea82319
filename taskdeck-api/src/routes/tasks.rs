/// Task endpoints
///
/// The task list and detail pages are public. Creation requires a session;
/// editing and destruction additionally require ownership. Destruction is
/// gated behind an explicit confirmation step.
///
/// # Endpoints
///
/// - `GET /v1/tasks` - Task list (public)
/// - `GET /v1/tasks/:id` - Task detail (public)
/// - `POST /v1/tasks` - Create task
/// - `GET /v1/tasks/:id/edit` - Edit-page payload (owner)
/// - `PUT /v1/tasks/:id` - Update task (owner)
/// - `DELETE /v1/tasks/:id` - Destroy task (owner, `?confirm=true`)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{authorization::require_ownership, middleware::CurrentUser},
    models::task::{CreateTask, Task, TaskStatus, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Confirmation prompt shown before destroying a task
pub const DESTROY_PROMPT: &str = "Are you sure?";

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// All tasks, newest first
    pub tasks: Vec<Task>,
}

/// Create/update request body
///
/// `status` arrives as a plain string so a blank value reports
/// "Status can't be blank" rather than a deserialization failure; an
/// unknown value reports "Status is not included in the list".
#[derive(Debug, Deserialize, Validate)]
pub struct TaskForm {
    /// Title (required, globally unique)
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub title: String,

    /// Optional body text
    #[serde(default)]
    pub content: Option<String>,

    /// Status: "todo", "doing", or "done"
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub status: String,
}

impl TaskForm {
    /// Validates the form and resolves the status string to its enum
    fn resolve(&self) -> ApiResult<TaskStatus> {
        self.validate()?;

        self.status.parse::<TaskStatus>().map_err(|_| {
            ApiError::ValidationError(vec![ValidationErrorDetail::new(
                "status",
                "is not included in the list",
            )])
        })
    }
}

/// Single-task response with a flash message
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,

    /// Flash message
    pub message: String,
}

/// Edit-page payload
#[derive(Debug, Serialize)]
pub struct TaskEditResponse {
    /// The task being edited
    pub task: Task,

    /// Valid status choices for the form select
    pub statuses: Vec<TaskStatus>,
}

/// Destroy query parameters
#[derive(Debug, Deserialize)]
pub struct DestroyParams {
    /// Explicit confirmation; without it the prompt is returned instead
    #[serde(default)]
    pub confirm: bool,
}

/// Destroy response: either the confirmation prompt or the result
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DestroyTaskResponse {
    /// Confirmation required before anything is deleted
    Confirmation {
        /// The literal prompt ("Are you sure?")
        prompt: String,
    },

    /// The task was destroyed
    Destroyed {
        /// Flash message ("Task was successfully destroyed.")
        message: String,
    },
}

/// Task list endpoint (public)
pub async fn index(State(state): State<AppState>) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list(&state.db, 100, 0).await?;

    Ok(Json(TaskListResponse { tasks }))
}

/// Task detail endpoint (public)
///
/// # Errors
///
/// - `404 Not Found`: unknown task
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Task creation endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Authorization: Bearer sess_...
/// Content-Type: application/json
///
/// {
///   "title": "テストタイトル",
///   "content": "本文",
///   "status": "todo"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `422 Unprocessable Entity`: "Title can't be blank",
///   "Title has already been taken", "Status can't be blank"
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<TaskForm>,
) -> ApiResult<Json<TaskResponse>> {
    let status = req.resolve()?;

    if Task::title_taken(&state.db, &req.title, None).await? {
        return Err(ApiError::ValidationError(vec![
            ValidationErrorDetail::taken("title"),
        ]));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: current.user_id,
            title: req.title,
            content: req.content,
            status,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, user_id = %current.user_id, "Task created");

    Ok(Json(TaskResponse {
        task,
        message: "Task was successfully created.".to_string(),
    }))
}

/// Edit-page endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `403 Forbidden`: "Forbidden access." (another user's task)
/// - `404 Not Found`: unknown task
pub async fn edit(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskEditResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_ownership(&current, task.user_id)?;

    Ok(Json(TaskEditResponse {
        task,
        statuses: TaskStatus::all().to_vec(),
    }))
}

/// Task update endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `403 Forbidden`: "Forbidden access." (another user's task)
/// - `404 Not Found`: unknown task
/// - `422 Unprocessable Entity`: "Title can't be blank",
///   "Title has already been taken", "Status can't be blank"
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskForm>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_ownership(&current, task.user_id)?;

    let status = req.resolve()?;

    if Task::title_taken(&state.db, &req.title, Some(task.id)).await? {
        return Err(ApiError::ValidationError(vec![
            ValidationErrorDetail::taken("title"),
        ]));
    }

    let updated = Task::update(
        &state.db,
        task.id,
        UpdateTask {
            title: req.title,
            content: req.content,
            status,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(task_id = %updated.id, user_id = %current.user_id, "Task updated");

    Ok(Json(TaskResponse {
        task: updated,
        message: "Task was successfully updated.".to_string(),
    }))
}

/// Task destroy endpoint
///
/// Without `?confirm=true` nothing is deleted and the confirmation prompt
/// is returned; the client destroys by repeating the request with the
/// parameter set.
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `403 Forbidden`: "Forbidden access." (another user's task)
/// - `404 Not Found`: unknown task
pub async fn destroy(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Query(params): Query<DestroyParams>,
) -> ApiResult<Json<DestroyTaskResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_ownership(&current, task.user_id)?;

    if !params.confirm {
        return Ok(Json(DestroyTaskResponse::Confirmation {
            prompt: DESTROY_PROMPT.to_string(),
        }));
    }

    Task::delete(&state.db, task.id).await?;

    tracing::info!(task_id = %task.id, user_id = %current.user_id, "Task destroyed");

    Ok(Json(DestroyTaskResponse::Destroyed {
        message: "Task was successfully destroyed.".to_string(),
    }))
}
