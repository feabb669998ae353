use validator::Validate;

use crate::forms::answers::{AnswerList, IdGenerator, UuidGenerator};
use crate::forms::{FormError, Submission};
use crate::models::question::{CreateQuestionDto, Question, QuestionType, UpdateQuestionDto};

pub type QuestionSubmission = Submission<CreateQuestionDto, UpdateQuestionDto>;

/// Create/edit question form. The question type lives in the answer list
/// so that changing it goes through the list's reset rule.
#[derive(Debug)]
pub struct QuestionForm<G = UuidGenerator> {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
    answers: AnswerList<G>,
}

impl<G: IdGenerator> QuestionForm<G> {
    pub fn new(ids: G) -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            categories: Vec::new(),
            answers: AnswerList::new(Vec::new(), None, ids),
        }
    }

    /// Seeds the edit form from a fetched question.
    pub fn from_question(question: &Question, ids: G) -> Self {
        Self {
            id: Some(question.id),
            title: question.question.clone(),
            content: question.description.clone(),
            categories: vec![question.category.clone()],
            answers: AnswerList::from_payload(
                &question.options,
                &question.answer,
                question.question_type,
                ids,
            ),
        }
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        self.answers.question_type()
    }

    pub fn set_question_type(&mut self, question_type: Option<QuestionType>) {
        self.answers.set_question_type(question_type);
    }

    pub fn answers(&self) -> &AnswerList<G> {
        &self.answers
    }

    pub fn answers_mut(&mut self) -> &mut AnswerList<G> {
        &mut self.answers
    }

    /// Runs the form-level and field-level checks and builds the request body.
    pub fn to_create_dto(&self) -> Result<CreateQuestionDto, FormError> {
        let payload = self.answers.to_payload();
        if payload.options.is_empty() {
            return Err(FormError::NoAnswers);
        }
        if payload.answer.is_empty() {
            return Err(FormError::NoCorrectAnswer);
        }

        let dto = CreateQuestionDto {
            question: self.title.trim().to_string(),
            description: self.content.clone(),
            answer: payload.answer,
            category: self.categories.join(","),
            options: payload.options,
            question_type: self.question_type(),
        };
        dto.validate()?;
        Ok(dto)
    }

    pub fn submit(&self) -> Result<QuestionSubmission, FormError> {
        let dto = self.to_create_dto()?;
        Ok(match self.id {
            Some(id) => Submission::Update {
                id,
                dto: dto.into(),
            },
            None => Submission::Create(dto),
        })
    }
}
