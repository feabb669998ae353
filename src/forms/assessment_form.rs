use serde::Serialize;
use validator::Validate;

use crate::forms::{FormError, Submission};
use crate::models::assessment::{AssessmentDetail, CreateAssessmentDto, UpdateAssessmentDto};
use crate::models::question::Question;

pub type AssessmentSubmission = Submission<CreateAssessmentDto, UpdateAssessmentDto>;

/// Entry of the question picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: i64,
}

pub fn question_options(questions: &[Question]) -> Vec<SelectOption> {
    questions
        .iter()
        .map(|q| SelectOption {
            label: q.question.clone(),
            value: q.id,
        })
        .collect()
}

/// Assessment form with an ordered list of question slots. A slot is
/// `None` until a question has been picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentForm {
    pub id: Option<i64>,
    pub name: String,
    pub level: String,
    questions: Vec<Option<i64>>,
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            level: String::new(),
            questions: vec![None],
        }
    }
}

impl AssessmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_detail(detail: &AssessmentDetail) -> Self {
        let mut questions: Vec<Option<i64>> =
            detail.question_ids().into_iter().map(Some).collect();
        if questions.is_empty() {
            questions.push(None);
        }
        Self {
            id: Some(detail.id),
            name: detail.name.clone(),
            level: detail.level.clone(),
            questions,
        }
    }

    pub fn slots(&self) -> &[Option<i64>] {
        &self.questions
    }

    pub fn append(&mut self) {
        self.questions.push(None);
    }

    /// The last remaining slot cannot be removed.
    pub fn can_remove(&self) -> bool {
        self.questions.len() > 1
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.questions.len() {
            return false;
        }
        self.questions.remove(index);
        true
    }

    pub fn select(&mut self, index: usize, question_id: i64) -> bool {
        match self.questions.get_mut(index) {
            Some(slot) => {
                *slot = Some(question_id);
                true
            }
            None => false,
        }
    }

    pub fn to_create_dto(&self) -> Result<CreateAssessmentDto, FormError> {
        let questions: Vec<i64> = self.questions.iter().flatten().copied().collect();
        if questions.is_empty() {
            return Err(FormError::NoQuestions);
        }
        let dto = CreateAssessmentDto {
            name: self.name.trim().to_string(),
            level: self.level.clone(),
            questions,
        };
        dto.validate()?;
        Ok(dto)
    }

    pub fn submit(&self) -> Result<AssessmentSubmission, FormError> {
        let dto = self.to_create_dto()?;
        Ok(match self.id {
            Some(id) => Submission::Update {
                id,
                dto: UpdateAssessmentDto {
                    name: Some(dto.name),
                    level: Some(dto.level),
                    questions: Some(dto.questions),
                },
            },
            None => Submission::Create(dto),
        })
    }
}
