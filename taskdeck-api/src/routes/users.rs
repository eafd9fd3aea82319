/// User endpoints (sign-up, Mypage, account editing)
///
/// # Endpoints
///
/// - `POST /v1/signup` - Create an account (public)
/// - `GET /v1/users/:id` - Profile ("Mypage") with the user's tasks
/// - `GET /v1/users/:id/edit` - Edit-page payload (self only)
/// - `PUT /v1/users/:id` - Update email/password (self only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{authorization::require_ownership, middleware::CurrentUser, password},
    models::{
        session::Session,
        task::Task,
        user::{CreateUser, UpdateUser, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// User representation safe for client responses (no password hash)
#[derive(Debug, Serialize)]
pub struct UserView {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// When the account was created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub password: String,

    /// Must match `password`
    #[serde(default)]
    pub password_confirmation: String,
}

/// Sign-up response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// The created user
    pub user: UserView,

    /// Flash message ("User was successfully created.")
    pub message: String,
}

/// Mypage response: the profile plus the user's tasks
#[derive(Debug, Serialize)]
pub struct MypageResponse {
    /// The profile owner
    pub user: UserView,

    /// The owner's tasks, newest first
    pub tasks: Vec<Task>,
}

/// Edit-page payload
#[derive(Debug, Serialize)]
pub struct UserEditResponse {
    /// The user being edited
    pub user: UserView,
}

/// Update request
///
/// `password` is optional; when present and non-empty it must match
/// `password_confirmation` and replaces the stored hash.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email address
    #[serde(default)]
    #[validate(length(min = 1, message = "can't be blank"))]
    pub email: String,

    /// New password (empty or absent = keep current)
    #[serde(default)]
    pub password: String,

    /// Must match `password` when a new password is supplied
    #[serde(default)]
    pub password_confirmation: String,
}

/// Update response
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    /// The updated user
    pub user: UserView,

    /// Flash message ("User was successfully updated.")
    pub message: String,
}

/// Sign-up endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/signup
/// Content-Type: application/json
///
/// {
///   "email": "test@example.com",
///   "password": "password",
///   "password_confirmation": "password"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: "Email can't be blank",
///   "Email has already been taken",
///   "Password confirmation doesn't match Password"
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    req.validate()?;

    if req.password_confirmation != req.password {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "password_confirmation",
            "doesn't match Password",
        )]));
    }

    if User::email_taken(&state.db, &req.email, None).await? {
        return Err(ApiError::ValidationError(vec![
            ValidationErrorDetail::taken("email"),
        ]));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(Json(SignupResponse {
        user: user.into(),
        message: "User was successfully created.".to_string(),
    }))
}

/// Profile ("Mypage") endpoint
///
/// Requires a session; any logged-in user can view a profile, which lists
/// the profile owner's tasks.
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `404 Not Found`: unknown user
pub async fn show(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MypageResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let tasks = Task::list_by_user(&state.db, user.id).await?;

    Ok(Json(MypageResponse {
        user: user.into(),
        tasks,
    }))
}

/// Edit-page endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `403 Forbidden`: "Forbidden access." (another user's edit page)
/// - `404 Not Found`: unknown user
pub async fn edit(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserEditResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    require_ownership(&current, user.id)?;

    Ok(Json(UserEditResponse { user: user.into() }))
}

/// Update endpoint
///
/// # Endpoint
///
/// ```text
/// PUT /v1/users/:id
/// Authorization: Bearer sess_...
/// Content-Type: application/json
///
/// {
///   "email": "update@example.com",
///   "password": "update_password",
///   "password_confirmation": "update_password"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required"
/// - `403 Forbidden`: "Forbidden access." (another user's record)
/// - `422 Unprocessable Entity`: "Email can't be blank",
///   "Email has already been taken",
///   "Password confirmation doesn't match Password"
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UpdateUserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    require_ownership(&current, user.id)?;

    req.validate()?;

    let password_hash = if req.password.is_empty() {
        None
    } else {
        if req.password_confirmation != req.password {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
                "password_confirmation",
                "doesn't match Password",
            )]));
        }
        Some(password::hash_password(&req.password)?)
    };

    if User::email_taken(&state.db, &req.email, Some(user.id)).await? {
        return Err(ApiError::ValidationError(vec![
            ValidationErrorDetail::taken("email"),
        ]));
    }

    let changed_password = password_hash.is_some();

    let updated = User::update(
        &state.db,
        user.id,
        UpdateUser {
            email: Some(req.email),
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    // A password change logs out every other device
    if changed_password {
        Session::delete_for_user_except(&state.db, updated.id, current.session_id).await?;
    }

    tracing::info!(user_id = %updated.id, "User updated");

    Ok(Json(UpdateUserResponse {
        user: updated.into(),
        message: "User was successfully updated.".to_string(),
    }))
}
