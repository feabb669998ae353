use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Most options a question can carry; the answer editor holds no more.
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
}

impl QuestionType {
    /// Single-choice questions allow exactly one correct option.
    pub fn is_exclusive(self) -> bool {
        matches!(self, QuestionType::SingleChoice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub description: String,
    /// Indices into `options` of the correct entries.
    pub answer: Vec<i64>,
    pub category: String,
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ====================================
// REQUEST PAYLOADS

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateQuestionDto {
    #[validate(length(min = 1, message = "question should not be empty"))]
    pub question: String,

    pub description: String,

    #[validate(length(min = 1, message = "answer should not be empty"))]
    pub answer: Vec<i64>,

    #[validate(length(min = 1, message = "category should not be empty"))]
    pub category: String,

    #[validate(
        length(min = 1, message = "options should not be empty"),
        custom(function = "within_option_cap")
    )]
    pub options: Vec<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
}

/// Every field optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "question should not be empty"))]
    pub question: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "answer should not be empty"))]
    pub answer: Option<Vec<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "category should not be empty"))]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, message = "options should not be empty"),
        custom(function = "within_option_cap")
    )]
    pub options: Option<Vec<String>>,

    /// `None` keeps the stored type, `Some(None)` clears it.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_type: Option<Option<QuestionType>>,
}

impl UpdateQuestionDto {
    /// Merges the present fields over an existing question.
    pub fn merge_into(self, current: Question) -> CreateQuestionDto {
        CreateQuestionDto {
            question: self.question.unwrap_or(current.question),
            description: self.description.unwrap_or(current.description),
            answer: self.answer.unwrap_or(current.answer),
            category: self.category.unwrap_or(current.category),
            options: self.options.unwrap_or(current.options),
            question_type: self.question_type.unwrap_or(current.question_type),
        }
    }
}

impl From<CreateQuestionDto> for UpdateQuestionDto {
    fn from(dto: CreateQuestionDto) -> Self {
        UpdateQuestionDto {
            question: Some(dto.question),
            description: Some(dto.description),
            answer: Some(dto.answer),
            category: Some(dto.category),
            options: Some(dto.options),
            question_type: Some(dto.question_type),
        }
    }
}

// an explicit `null` still counts as a present field
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn within_option_cap(options: &[String]) -> Result<(), ValidationError> {
    if options.len() <= MAX_OPTIONS {
        return Ok(());
    }
    let mut err = ValidationError::new("max_options");
    err.message = Some(Cow::Owned(format!(
        "options must contain at most {} entries",
        MAX_OPTIONS
    )));
    Err(err)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportQuestionsDto {
    #[validate(length(min = 1, message = "questions should not be empty"), nested)]
    pub questions: Vec<CreateQuestionDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_dto() -> CreateQuestionDto {
        serde_json::from_value(json!({
            "question": "Capital of France?",
            "description": "",
            "answer": [0],
            "category": "geography",
            "options": ["Paris", "Lyon"],
            "type": "SINGLE_CHOICE"
        }))
        .unwrap()
    }

    #[test]
    fn accepts_complete_payload() {
        let dto = valid_dto();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.question_type, Some(QuestionType::SingleChoice));
    }

    #[test]
    fn rejects_empty_required_fields() {
        let mut dto = valid_dto();
        dto.question.clear();
        dto.options.clear();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("question"));
        assert!(fields.contains_key("options"));
        assert!(!fields.contains_key("category"));
    }

    #[test]
    fn type_is_optional_but_must_be_known() {
        let without_type: CreateQuestionDto = serde_json::from_value(json!({
            "question": "q", "description": "", "answer": [1],
            "category": "c", "options": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(without_type.question_type, None);

        let unknown = serde_json::from_value::<CreateQuestionDto>(json!({
            "question": "q", "description": "", "answer": [1],
            "category": "c", "options": ["a"], "type": "ESSAY"
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn update_keeps_absent_fields() {
        let now = Utc::now();
        let current = Question {
            id: 1,
            question: "old".into(),
            description: "d".into(),
            answer: vec![0],
            category: "c".into(),
            options: vec!["a".into()],
            question_type: Some(QuestionType::MultipleChoice),
            created_at: now,
            updated_at: now,
        };
        let patch = UpdateQuestionDto {
            question: Some("new".into()),
            ..Default::default()
        };
        let merged = patch.merge_into(current);
        assert_eq!(merged.question, "new");
        assert_eq!(merged.category, "c");
        assert_eq!(merged.question_type, Some(QuestionType::MultipleChoice));
    }

    #[test]
    fn more_options_than_the_editor_holds_are_rejected() {
        let mut dto = valid_dto();
        dto.options = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("options"));
        assert!(errors.to_string().contains("at most 4"), "{}", errors);

        dto.options.truncate(MAX_OPTIONS);
        assert!(dto.validate().is_ok());

        let patch = UpdateQuestionDto {
            options: Some(["a", "b", "c", "d", "e"].map(String::from).to_vec()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn null_type_clears_and_absent_type_keeps() {
        let now = Utc::now();
        let current = Question {
            id: 1,
            question: "q".into(),
            description: String::new(),
            answer: vec![0],
            category: "c".into(),
            options: vec!["a".into()],
            question_type: Some(QuestionType::SingleChoice),
            created_at: now,
            updated_at: now,
        };

        let absent: UpdateQuestionDto = serde_json::from_value(json!({ "category": "x" })).unwrap();
        assert_eq!(absent.question_type, None);
        assert_eq!(
            absent.merge_into(current.clone()).question_type,
            Some(QuestionType::SingleChoice)
        );

        let cleared: UpdateQuestionDto = serde_json::from_value(json!({ "type": null })).unwrap();
        assert_eq!(cleared.question_type, Some(None));
        assert_eq!(cleared.merge_into(current).question_type, None);
    }

    #[test]
    fn import_validates_each_question() {
        let mut bad = valid_dto();
        bad.category.clear();
        let dto = ImportQuestionsDto {
            questions: vec![valid_dto(), bad],
        };
        assert!(dto.validate().is_err());
        assert!(
            ImportQuestionsDto { questions: vec![] }
                .validate()
                .is_err()
        );
    }
}
