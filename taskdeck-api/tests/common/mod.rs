/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations run on first connect)
/// - Test user creation with a known password
/// - Session token generation
/// - Request/response helpers
///
/// Tests that use this module require a running PostgreSQL instance and a
/// `DATABASE_URL` environment variable; they are marked `#[ignore]` so the
/// default `cargo test` run stays hermetic.

use axum::body::Body;
use axum::http::Request;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::auth::password::hash_password;
use taskdeck_shared::models::session::Session;
use taskdeck_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// The known plaintext password for every test user
pub const TEST_PASSWORD: &str = "password";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub session_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user and live session
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let user = create_test_user(&db).await?;

        let (_session, session_token) =
            Session::create(&db, user.id, config.session.ttl_hours).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            session_token,
        })
    }

    /// Returns the authorization header value for the context's session
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.session_token)
    }

    /// Cleans up test data
    ///
    /// Deleting the user cascades to their sessions and tasks.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Creates a user with a unique email and the known test password
pub async fn create_test_user(db: &PgPool) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    Ok(user)
}

/// Builds a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Builds an authenticated JSON request
pub fn authed_json_request(
    method: &str,
    uri: &str,
    auth: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Builds a bodyless request, optionally authenticated
pub fn bare_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).expect("request should build")
}

/// Reads a response body to a string
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    String::from_utf8_lossy(&bytes).to_string()
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
