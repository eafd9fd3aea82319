/// Session authentication for Axum
///
/// [`CurrentUser`] is an extractor: a protected handler declares it as a
/// parameter and receives the authenticated session context, or the
/// request is rejected with 401 "Login required" before the handler runs.
/// Public handlers simply don't declare it.
///
/// The token is presented as `Authorization: Bearer sess_...` and resolved
/// against the server-side session store, so logout invalidates it
/// immediately.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::middleware::CurrentUser;
///
/// async fn protected_handler(current: CurrentUser) -> String {
///     format!("Hello, {}!", current.email)
/// }
/// ```

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::authorization::AuthzError;
use crate::models::{session::Session, user::User};

/// The authenticated session context for a request
///
/// Built by the extractor from the session store and passed explicitly to
/// every authorization check; the "current user" is never global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Authenticated user's email
    pub email: String,

    /// The session backing this request (deleted on logout)
    pub session_id: Uuid,
}

impl CurrentUser {
    /// Builds a context from a session row and its user
    pub fn from_session(session: &Session, user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            session_id: session.id,
        }
    }
}

/// Rejection mapping for failed extraction
///
/// The bodies are the literal user-facing messages.
impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        match self {
            AuthzError::LoginRequired => {
                (StatusCode::UNAUTHORIZED, "Login required").into_response()
            }
            AuthzError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden access.").into_response(),
            AuthzError::DatabaseError(e) => {
                tracing::error!("Session lookup failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = PgPool::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthzError::LoginRequired)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthzError::LoginRequired)?;

        // Expired sessions are filtered by the query itself
        let session = Session::find_by_token(&pool, token)
            .await?
            .ok_or(AuthzError::LoginRequired)?;

        // A session whose user vanished is as good as no session
        let user = User::find_by_id(&pool, session.user_id)
            .await?
            .ok_or(AuthzError::LoginRequired)?;

        Ok(CurrentUser::from_session(&session, &user))
    }
}
