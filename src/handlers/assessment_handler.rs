use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use crate::AppState;
use crate::handlers::extract::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::handlers::grid_response;
use crate::models::assessment::{AssessmentDetail, CreateAssessmentDto, UpdateAssessmentDto};
use crate::services::assessment_service;
use crate::services::errors::ApiError;
use crate::services::grid::GridQuery;

pub async fn create_assessment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAssessmentDto>,
) -> Result<(StatusCode, Json<AssessmentDetail>), ApiError> {
    let detail = assessment_service::create(&state.pool, dto).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_assessments(
    State(state): State<AppState>,
    ValidatedQuery(grid): ValidatedQuery<GridQuery>,
) -> Result<Response, ApiError> {
    let assessments = assessment_service::find_all(&state.pool).await?;
    Ok(grid_response(&grid, assessments))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<AssessmentDetail>, ApiError> {
    Ok(Json(assessment_service::find_one(&state.pool, id).await?))
}

pub async fn update_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAssessmentDto>,
) -> Result<Json<AssessmentDetail>, ApiError> {
    Ok(Json(assessment_service::update(&state.pool, id, dto).await?))
}

pub async fn delete_assessment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    assessment_service::remove(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
