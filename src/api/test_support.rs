//! Router harness for handler tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    models::Claims,
    repository::{memory::InMemoryStore, MangaStore, PrestamoStore, Repository},
    services::Services,
    AppState,
};

pub struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::with_stores(store.clone(), store)
    }

    pub fn with_stores(mangas: Arc<dyn MangaStore>, prestamos: Arc<dyn PrestamoStore>) -> Self {
        let config = AppConfig::default();
        let token = Claims::new("tester", Duration::hours(1))
            .create_token(&config.auth.jwt_secret)
            .unwrap();
        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(Services::new(Repository::with_stores(mangas, prestamos))),
        };
        Self {
            router: super::router(state),
            token,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.call(request).await
    }

    pub async fn send_anonymous(&self, method: Method, uri: &str) -> (StatusCode, HeaderMap, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }
}
