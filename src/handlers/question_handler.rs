use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use crate::AppState;
use crate::handlers::extract::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::handlers::grid_response;
use crate::models::question::{
    CreateQuestionDto, ImportQuestionsDto, ImportResult, Question, UpdateQuestionDto,
};
use crate::services::errors::ApiError;
use crate::services::grid::GridQuery;
use crate::services::question_service;

pub async fn create_question(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let question = question_service::create(&state.pool, dto).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn list_questions(
    State(state): State<AppState>,
    ValidatedQuery(grid): ValidatedQuery<GridQuery>,
) -> Result<Response, ApiError> {
    let questions = question_service::find_all(&state.pool).await?;
    Ok(grid_response(&grid, questions))
}

pub async fn get_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Question>, ApiError> {
    Ok(Json(question_service::find_one(&state.pool, id).await?))
}

pub async fn update_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionDto>,
) -> Result<Json<Question>, ApiError> {
    Ok(Json(question_service::update(&state.pool, id, dto).await?))
}

pub async fn delete_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    question_service::remove(&state.pool, id).await?;
    Ok(StatusCode::OK)
}

pub async fn import_questions(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ImportQuestionsDto>,
) -> Result<(StatusCode, Json<ImportResult>), ApiError> {
    let result = question_service::import(&state.pool, dto).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
