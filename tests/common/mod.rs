//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gameshelf_server::api::create_router;
use gameshelf_server::config::AppConfig;
use gameshelf_server::models::{User, UserClaims};
use gameshelf_server::repository::memory::{MemoryLibraryStore, MemoryUserDirectory};
use gameshelf_server::repository::Repository;
use gameshelf_server::services::Services;
use gameshelf_server::AppState;

pub const JWT_SECRET: &str = "test-secret";

/// A router over fresh in-memory stores, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryLibraryStore>,
    pub users: Arc<MemoryUserDirectory>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryLibraryStore::default());
        let users = Arc::new(MemoryUserDirectory::default());

        let mut config = AppConfig::default();
        config.auth.jwt_secret = JWT_SECRET.to_string();

        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(Services::new(Repository::new(store.clone(), users.clone()))),
        };

        Self {
            router: create_router(state),
            store,
            users,
        }
    }

    /// Register an owner and return a bearer token for them.
    pub async fn login(&self, username: &str) -> (User, String) {
        let user = self.users.register(username).await;
        (user, token_for(username))
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Response {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Response {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// GET a list endpoint and return the external game ids it contains.
    pub async fn listed_ids(&self, uri: &str, token: &str) -> Vec<i64> {
        let response = self.get(uri, token).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        body_json(response)
            .await
            .as_array()
            .expect("list body")
            .iter()
            .map(|e| e["externalGameId"].as_i64().unwrap())
            .collect()
    }
}

pub fn token_for(username: &str) -> String {
    UserClaims::new(username, 1).create_token(JWT_SECRET).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
