use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::question::Question;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDetail {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assessment_question_mapping: Vec<QuestionMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMapping {
    pub question: Question,
}

impl AssessmentDetail {
    pub fn question_ids(&self) -> Vec<i64> {
        self.assessment_question_mapping
            .iter()
            .map(|m| m.question.id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateAssessmentDto {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "level should not be empty"))]
    pub level: String,

    #[validate(
        length(min = 1, message = "questions should not be empty"),
        custom(function = "unique_ids")
    )]
    pub questions: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateAssessmentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "level should not be empty"))]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, message = "questions should not be empty"),
        custom(function = "unique_ids")
    )]
    pub questions: Option<Vec<i64>>,
}

fn unique_ids(ids: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if ids.iter().all(|id| seen.insert(*id)) {
        return Ok(());
    }
    let mut err = ValidationError::new("unique");
    err.message = Some(Cow::Borrowed("questions must not contain duplicates"));
    Err(err)
}
