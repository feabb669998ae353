#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_platform_api::{AppState, app, db};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn total_count(&self) -> Option<usize> {
        self.headers
            .get("x-total-count")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

/// Router over a fresh in-memory database.
pub async fn test_app() -> Router {
    // one connection, otherwise every connection sees its own empty database
    let pool = db::establish_connection("sqlite::memory:", 1)
        .await
        .expect("open in-memory database");
    db::init_db(&pool).await.expect("create schema");
    app(AppState { pool })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("route request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn question_body(question: &str, category: &str) -> Value {
    json!({
        "question": question,
        "description": "",
        "answer": [0],
        "category": category,
        "options": ["first", "second"],
        "type": "SINGLE_CHOICE"
    })
}

/// Creates a question and returns its id.
pub async fn create_question(app: &Router, question: &str, category: &str) -> i64 {
    let res = send(
        app,
        Method::POST,
        "/questions",
        Some(question_body(question, category)),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["id"].as_i64().expect("question id")
}
