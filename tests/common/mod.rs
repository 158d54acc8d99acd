//! Shared harness for HTTP-level tests.
//!
//! Each [`TestApp`] owns a fresh in-memory database and drives the real router
//! with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use game_library_api::{app, db};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePool;
use tower::ServiceExt;

pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect_in_memory().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        let router = app(pool.clone());
        Self { pool, router }
    }

    /// A database with one player (`test_player`, id 1) and nothing else.
    pub async fn with_player() -> Self {
        let app = Self::new().await;
        let resp = app.post("/api/players", serde_json::json!({ "username": "test_player" })).await;
        assert_eq!(resp.status, StatusCode::CREATED);
        app
    }

    /// `with_player` plus one fully-populated game (id 1) owned by player 1.
    pub async fn with_player_and_game() -> Self {
        let app = Self::with_player().await;
        let resp = app
            .post(
                "/api/games",
                serde_json::json!({
                    "title": "Test Game",
                    "price": 49.99,
                    "release_year": 2023,
                    "weight": 150.0,
                    "genre": "Action",
                    "player_id": 1
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
        app
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
