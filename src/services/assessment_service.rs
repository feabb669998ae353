use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::{self, AssessmentRecord};
use crate::models::assessment::{
    AssessmentDetail, CreateAssessmentDto, QuestionMapping, UpdateAssessmentDto,
};
use crate::services::errors::ApiError;

pub async fn create(
    pool: &SqlitePool,
    dto: CreateAssessmentDto,
) -> Result<AssessmentDetail, ApiError> {
    ensure_questions_exist(pool, &dto.questions).await?;

    let mut tx = pool.begin().await?;
    let record = db::insert_assessment(&mut *tx, &dto.name, &dto.level).await?;
    db::replace_assessment_questions(&mut *tx, record.id, &dto.questions).await?;
    tx.commit().await?;

    info!(
        assessment_id = record.id,
        questions = dto.questions.len(),
        "assessment created"
    );
    load_detail(pool, record).await
}

pub async fn find_all(pool: &SqlitePool) -> Result<Vec<AssessmentDetail>, ApiError> {
    let records = db::fetch_assessment_records(pool).await?;
    let mut details = Vec::with_capacity(records.len());
    for record in records {
        details.push(load_detail(pool, record).await?);
    }
    Ok(details)
}

pub async fn find_one(pool: &SqlitePool, id: i64) -> Result<AssessmentDetail, ApiError> {
    let record = db::fetch_assessment_record(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Assessment", id))?;
    load_detail(pool, record).await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    dto: UpdateAssessmentDto,
) -> Result<AssessmentDetail, ApiError> {
    if db::fetch_assessment_record(pool, id).await?.is_none() {
        return Err(ApiError::not_found("Assessment", id));
    }
    if let Some(questions) = &dto.questions {
        ensure_questions_exist(pool, questions).await?;
    }

    let mut tx = pool.begin().await?;
    let record =
        db::update_assessment_record(&mut *tx, id, dto.name.as_deref(), dto.level.as_deref())
            .await?
            .ok_or_else(|| ApiError::not_found("Assessment", id))?;
    if let Some(questions) = &dto.questions {
        db::replace_assessment_questions(&mut *tx, id, questions).await?;
    }
    tx.commit().await?;

    info!(assessment_id = id, "assessment updated");
    load_detail(pool, record).await
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    if !db::delete_assessment(pool, id).await? {
        warn!(assessment_id = id, "delete requested for missing assessment");
        return Err(ApiError::not_found("Assessment", id));
    }
    info!(assessment_id = id, "assessment removed");
    Ok(())
}

// ====================================
// HELPERS

async fn ensure_questions_exist(pool: &SqlitePool, ids: &[i64]) -> Result<(), ApiError> {
    let missing = db::missing_question_ids(pool, ids).await?;
    if missing.is_empty() {
        return Ok(());
    }
    let list = missing
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ApiError::BadRequest(format!("Unknown question ids: {}", list)))
}

async fn load_detail(
    pool: &SqlitePool,
    record: AssessmentRecord,
) -> Result<AssessmentDetail, ApiError> {
    let questions = db::fetch_assessment_questions(pool, record.id).await?;
    Ok(AssessmentDetail {
        id: record.id,
        name: record.name,
        level: record.level,
        created_at: record.created_at,
        updated_at: record.updated_at,
        assessment_question_mapping: questions
            .into_iter()
            .map(|question| QuestionMapping { question })
            .collect(),
    })
}
