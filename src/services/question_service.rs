use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db;
use crate::models::question::{
    CreateQuestionDto, ImportQuestionsDto, ImportResult, Question, UpdateQuestionDto,
};
use crate::services::errors::ApiError;

pub async fn create(pool: &SqlitePool, dto: CreateQuestionDto) -> Result<Question, ApiError> {
    let question = db::insert_question(pool, &dto).await?;
    info!(question_id = question.id, "question created");
    Ok(question)
}

pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Question>, ApiError> {
    Ok(db::fetch_questions(pool).await?)
}

pub async fn find_one(pool: &SqlitePool, id: i64) -> Result<Question, ApiError> {
    db::fetch_question(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question", id))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    dto: UpdateQuestionDto,
) -> Result<Question, ApiError> {
    let current = find_one(pool, id).await?;
    let merged = dto.merge_into(current);

    let question = db::update_question(pool, id, &merged)
        .await?
        .ok_or_else(|| ApiError::not_found("Question", id))?;
    info!(question_id = id, "question updated");
    Ok(question)
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    if !db::delete_question(pool, id).await? {
        warn!(question_id = id, "delete requested for missing question");
        return Err(ApiError::not_found("Question", id));
    }
    info!(question_id = id, "question removed");
    Ok(())
}

/// Inserts every question or none of them.
pub async fn import(pool: &SqlitePool, dto: ImportQuestionsDto) -> Result<ImportResult, ApiError> {
    let mut tx = pool.begin().await?;
    for question in &dto.questions {
        db::insert_question(&mut *tx, question).await?;
    }
    tx.commit().await?;

    let count = dto.questions.len() as u64;
    info!(count, "questions imported");
    Ok(ImportResult { count })
}
