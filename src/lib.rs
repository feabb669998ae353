use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Full HTTP application: question and assessment routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    // the dashboard runs on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([handlers::TOTAL_COUNT]);

    Router::new()
        .nest("/questions", routes::question_routes::router())
        .nest("/assessments", routes::assessment_routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
