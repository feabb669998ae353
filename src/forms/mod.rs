//! Editing state behind the administration dashboard's forms.
//!
//! Nothing here renders anything: these are the values a form holds
//! between user inputs, and the payloads it submits to the REST endpoints.

pub mod answers;
pub mod assessment_form;
pub mod question_form;

use axum::http::Method;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("at least one answer must be added")]
    NoAnswers,
    #[error("at least one answer must be marked as correct")]
    NoCorrectAnswer,
    #[error("at least one question must be selected")]
    NoQuestions,
    #[error("{0}")]
    Fields(#[from] ValidationErrors),
}

/// What a form submit turns into: a create for new entities, an update
/// when the form was seeded from an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<C, U> {
    Create(C),
    Update { id: i64, dto: U },
}

impl<C, U> Submission<C, U> {
    pub fn method(&self) -> Method {
        match self {
            Submission::Create(_) => Method::POST,
            Submission::Update { .. } => Method::PUT,
        }
    }

    /// Request path under a collection such as `/questions`.
    pub fn path(&self, collection: &str) -> String {
        match self {
            Submission::Create(_) => collection.to_string(),
            Submission::Update { id, .. } => format!("{}/{}", collection, id),
        }
    }
}
