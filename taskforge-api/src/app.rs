/// Application state and router builder
///
/// The state carries the three domain services behind their repository
/// traits, so the same router runs against Postgres in production and the
/// in-memory store in tests.
///
/// # Example
///
/// ```no_run
/// use taskforge_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::with_postgres(pool, config);
/// let app = taskforge_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskforge_shared::{
    repository::{PgCategoryRepository, PgTaskRepository, PgUserRepository},
    service::{CategoryService, TaskService, UserService},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the
/// services are Arc-backed, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// User domain service
    pub users: UserService,

    /// Task domain service
    pub tasks: TaskService,

    /// Category domain service
    pub categories: CategoryService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state from pre-built services
    ///
    /// Used by tests to wire the services to an in-memory store.
    pub fn new(
        users: UserService,
        tasks: TaskService,
        categories: CategoryService,
        config: Config,
    ) -> Self {
        Self {
            users,
            tasks,
            categories,
            config: Arc::new(config),
        }
    }

    /// Creates application state backed by a Postgres pool
    pub fn with_postgres(pool: PgPool, config: Config) -> Self {
        Self::new(
            UserService::new(Arc::new(PgUserRepository::new(pool.clone()))),
            TaskService::new(Arc::new(PgTaskRepository::new(pool.clone()))),
            CategoryService::new(Arc::new(PgCategoryRepository::new(pool))),
            config,
        )
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// └── /api/v1/
///     ├── /users/                 # User accounts
///     │   ├── POST   /            # Register
///     │   ├── GET    /            # List (paginated)
///     │   ├── GET    /:id
///     │   ├── PUT    /:id         # Profile update (name fields)
///     │   └── DELETE /:id         # Soft delete
///     ├── /tasks/                 # Tasks (owner via x-user-id)
///     │   ├── POST   /
///     │   ├── GET    /            # Owner's tasks, ?status= filter
///     │   ├── GET    /:id
///     │   ├── PUT    /:id         # Partial update
///     │   ├── PATCH  /:id/status
///     │   └── DELETE /:id
///     └── /categories/            # Categories (owner via x-user-id)
///         ├── POST   /
///         ├── GET    /            # Owner's categories
///         ├── GET    /:id
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
///
/// Middleware stack: request logging (tower-http `TraceLayer`) and CORS.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/", post(routes::users::create_user))
        .route("/", get(routes::users::list_users))
        .route("/:id", get(routes::users::get_user))
        .route("/:id", put(routes::users::update_user))
        .route("/:id", delete(routes::users::delete_user));

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/", get(routes::tasks::list_tasks))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id/status", patch(routes::tasks::update_task_status))
        .route("/:id", delete(routes::tasks::delete_task));

    let category_routes = Router::new()
        .route("/", post(routes::categories::create_category))
        .route("/", get(routes::categories::list_categories))
        .route("/:id", get(routes::categories::get_category))
        .route("/:id", put(routes::categories::update_category))
        .route("/:id", delete(routes::categories::delete_category));

    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/categories", category_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
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
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
