/// Session endpoints (login/logout)
///
/// The login/logout lifecycle runs through the pure state machine in
/// `taskdeck_shared::auth::flow`; these handlers perform the side effects
/// (credential check, session row creation/deletion) and return the
/// machine's message verbatim.
///
/// # Endpoints
///
/// - `POST /v1/login` - Authenticate and receive a session token
/// - `DELETE /v1/logout` - Invalidate the current session

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use taskdeck_shared::{
    auth::{
        flow::{SessionEvent, SessionState},
        middleware::CurrentUser,
        password,
    },
    models::{session::Session, user::User},
};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Opaque session token; present it as `Authorization: Bearer <token>`.
    /// This is the only time the token is returned.
    pub session_token: String,

    /// Flash message ("Login successful")
    pub message: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Flash message ("Logged out")
    pub message: String,
}

/// Resolves a credential pair to a user
///
/// Blank email, blank password, unknown email, and a wrong password all
/// resolve to None; the caller cannot distinguish them, and neither can
/// the response.
async fn authenticate(
    pool: &PgPool,
    email: &str,
    password_input: &str,
) -> ApiResult<Option<User>> {
    if email.is_empty() || password_input.is_empty() {
        return Ok(None);
    }

    let Some(user) = User::find_by_email(pool, email).await? else {
        return Ok(None);
    };

    if password::verify_password(password_input, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "password"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: "Login failed" (wrong, unknown, or blank credentials)
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = authenticate(&state.db, &req.email, &req.password).await?;

    let (next_state, message) = SessionState::Anonymous.apply(SessionEvent::Login {
        credentials_valid: user.is_some(),
    });

    if !next_state.is_authenticated() {
        return Err(ApiError::Unauthorized(message.to_string()));
    }

    // Checked above: an authenticated next state implies a resolved user
    let Some(user) = user else {
        return Err(ApiError::InternalError(
            "Authenticated transition without a user".to_string(),
        ));
    };

    let (_session, token) =
        Session::create(&state.db, user.id, state.session_ttl_hours()).await?;
    User::update_last_login(&state.db, user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id.to_string(),
        session_token: token,
        message: message.to_string(),
    }))
}

/// Logout endpoint
///
/// Deletes the session row backing the presented token, invalidating it
/// immediately.
///
/// # Endpoint
///
/// ```text
/// DELETE /v1/logout
/// Authorization: Bearer sess_...
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: "Login required" (no active session)
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<LogoutResponse>> {
    Session::delete(&state.db, current.session_id).await?;

    let (_, message) = SessionState::Authenticated.apply(SessionEvent::Logout);

    tracing::info!(user_id = %current.user_id, "User logged out");

    Ok(Json(LogoutResponse {
        message: message.to_string(),
    }))
}
