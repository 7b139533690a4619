/// Common test utilities for integration tests
///
/// The router under test is wired to the in-memory repository, so the full
/// HTTP surface is exercised without a running database.

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use taskforge_api::app::{build_router, AppState};
use taskforge_api::config::{ApiConfig, Config, DatabaseConfig};
use taskforge_shared::repository::MemoryStore;
use taskforge_shared::service::{CategoryService, TaskService, UserService};
use tower::Service as _;
use uuid::Uuid;

/// Test context holding the app under test
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Builds a router backed by a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://unused".to_string(),
                max_connections: 1,
            },
        };

        let state = AppState::new(
            UserService::new(store.clone()),
            TaskService::new(store.clone()),
            CategoryService::new(store),
            config,
        );

        TestContext {
            app: build_router(state),
        }
    }

    /// Sends a request through the router
    pub async fn send(&mut self, request: Request<Body>) -> Response<axum::body::Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a JSON request with an optional acting user header
    pub async fn send_json(
        &mut self,
        method: &str,
        uri: &str,
        acting_user: Option<Uuid>,
        body: serde_json::Value,
    ) -> Response<axum::body::Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(user_id) = acting_user {
            builder = builder.header("x-user-id", user_id.to_string());
        }

        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    /// Sends a bodyless request with an optional acting user header
    pub async fn send_empty(
        &mut self,
        method: &str,
        uri: &str,
        acting_user: Option<Uuid>,
    ) -> Response<axum::body::Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user_id) = acting_user {
            builder = builder.header("x-user-id", user_id.to_string());
        }

        let request = builder.body(Body::empty()).unwrap();
        self.send(request).await
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<axum::body::Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user and returns their id
pub async fn register_user(ctx: &mut TestContext, username: &str, email: &str) -> Uuid {
    let response = ctx
        .send_json(
            "POST",
            "/api/v1/users",
            None,
            serde_json::json!({
                "username": username,
                "email": email,
                "password": "pw123456",
                "first_name": "Test",
                "last_name": "User"
            }),
        )
        .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let json = body_json(response).await;
    json["user"]["id"].as_str().unwrap().parse().unwrap()
}
