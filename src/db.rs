use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

use crate::models::question::{CreateQuestionDto, Question, QuestionType};

// ===============================================
// DATABASE MODELS

#[derive(Debug, FromRow)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub description: String,
    pub answer: Json<Vec<i64>>,
    pub category: String,
    pub options: Json<Vec<String>>,
    #[sqlx(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        Question {
            id: record.id,
            question: record.question,
            description: record.description,
            answer: record.answer.0,
            category: record.category,
            options: record.options.0,
            question_type: record.question_type,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AssessmentRecord {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ======================================================
// CONNECTION & INITIALIZATION

/// Opens a pool, creating the database file when it does not exist yet.
pub async fn establish_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn init_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            answer TEXT NOT NULL,
            category TEXT NOT NULL,
            options TEXT NOT NULL,
            type TEXT,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        );

        CREATE TABLE IF NOT EXISTS assessments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            level TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        );

        CREATE TABLE IF NOT EXISTS assessment_question_mapping (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            assessment_id INTEGER NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
            question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            UNIQUE (assessment_id, question_id)
        );

        CREATE INDEX IF NOT EXISTS idx_mapping_assessment
            ON assessment_question_mapping (assessment_id, position);
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

// =============================================================
// QUESTION OPERATIONS

pub async fn insert_question<'e, E>(
    executor: E,
    dto: &CreateQuestionDto,
) -> Result<Question, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();
    let record = sqlx::query_as::<_, QuestionRecord>(
        r#"
        INSERT INTO questions (
            question, description, answer, category, options, type, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&dto.question)
    .bind(&dto.description)
    .bind(Json(&dto.answer))
    .bind(&dto.category)
    .bind(Json(&dto.options))
    .bind(dto.question_type)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(record.into())
}

pub async fn fetch_questions(pool: &SqlitePool) -> Result<Vec<Question>, sqlx::Error> {
    let records = sqlx::query_as::<_, QuestionRecord>("SELECT * FROM questions ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    Ok(records.into_iter().map(Question::from).collect())
}

pub async fn fetch_question(pool: &SqlitePool, id: i64) -> Result<Option<Question>, sqlx::Error> {
    let record = sqlx::query_as::<_, QuestionRecord>("SELECT * FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record.map(Question::from))
}

pub async fn update_question(
    pool: &SqlitePool,
    id: i64,
    dto: &CreateQuestionDto,
) -> Result<Option<Question>, sqlx::Error> {
    let record = sqlx::query_as::<_, QuestionRecord>(
        r#"
        UPDATE questions
        SET question = ?, description = ?, answer = ?, category = ?,
            options = ?, type = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&dto.question)
    .bind(&dto.description)
    .bind(Json(&dto.answer))
    .bind(&dto.category)
    .bind(Json(&dto.options))
    .bind(dto.question_type)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record.map(Question::from))
}

/// Returns whether a row was deleted.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Ids from `ids` that have no matching question row, in input order.
pub async fn missing_question_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<i64>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new("SELECT id FROM questions WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let found: Vec<i64> = builder
        .build_query_scalar::<i64>()
        .fetch_all(pool)
        .await?;

    Ok(ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect())
}

// ==========================================
// ASSESSMENT OPERATIONS

pub async fn insert_assessment<'e, E>(
    executor: E,
    name: &str,
    level: &str,
) -> Result<AssessmentRecord, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();
    sqlx::query_as::<_, AssessmentRecord>(
        r#"
        INSERT INTO assessments (name, level, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(level)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub async fn update_assessment_record<'e, E>(
    executor: E,
    id: i64,
    name: Option<&str>,
    level: Option<&str>,
) -> Result<Option<AssessmentRecord>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, AssessmentRecord>(
        r#"
        UPDATE assessments
        SET name = COALESCE(?, name), level = COALESCE(?, level), updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(level)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Replaces the ordered question list of an assessment.
pub async fn replace_assessment_questions(
    conn: &mut SqliteConnection,
    assessment_id: i64,
    question_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM assessment_question_mapping WHERE assessment_id = ?")
        .bind(assessment_id)
        .execute(&mut *conn)
        .await?;

    for (position, question_id) in question_ids.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO assessment_question_mapping (assessment_id, question_id, position)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(assessment_id)
        .bind(*question_id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn fetch_assessment_record(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<AssessmentRecord>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRecord>("SELECT * FROM assessments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_assessment_records(
    pool: &SqlitePool,
) -> Result<Vec<AssessmentRecord>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRecord>("SELECT * FROM assessments ORDER BY id ASC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_assessment_questions(
    pool: &SqlitePool,
    assessment_id: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    let records = sqlx::query_as::<_, QuestionRecord>(
        r#"
        SELECT q.* FROM assessment_question_mapping m
        JOIN questions q ON q.id = m.question_id
        WHERE m.assessment_id = ?
        ORDER BY m.position ASC
        "#,
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(Question::from).collect())
}

pub async fn delete_assessment(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assessments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
