/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session lifetime in hours
    pub fn session_ttl_hours(&self) -> i64 {
        self.config.session.ttl_hours
    }
}

/// Lets the `CurrentUser` extractor borrow the pool from our state
impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> PgPool {
        state.db.clone()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /v1/
///     ├── POST   /signup            # Create account (public)
///     ├── POST   /login             # Start session (public)
///     ├── DELETE /logout            # End session
///     ├── GET    /tasks             # Task list (public)
///     ├── POST   /tasks             # Create task
///     ├── GET    /tasks/:id         # Task detail (public)
///     ├── GET    /tasks/:id/edit    # Edit payload (owner)
///     ├── PUT    /tasks/:id         # Update task (owner)
///     ├── DELETE /tasks/:id         # Destroy task (owner, confirm gate)
///     ├── GET    /users/:id         # Mypage
///     ├── GET    /users/:id/edit    # Edit payload (self)
///     └── PUT    /users/:id         # Update account (self)
/// ```
///
/// Authentication is enforced per handler by the `CurrentUser` extractor:
/// protected handlers declare it, public ones don't. The middleware stack
/// (bottom to top) is request tracing, CORS, and security headers.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let v1_routes = Router::new()
        .route("/signup", post(routes::users::signup))
        .route("/login", post(routes::sessions::login))
        .route("/logout", delete(routes::sessions::logout))
        .route(
            "/tasks",
            get(routes::tasks::index).post(routes::tasks::create),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::show)
                .put(routes::tasks::update)
                .delete(routes::tasks::destroy),
        )
        .route("/tasks/:id/edit", get(routes::tasks::edit))
        .route(
            "/users/:id",
            get(routes::users::show).put(routes::users::update),
        )
        .route("/users/:id/edit", get(routes::users::edit));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
