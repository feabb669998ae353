use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::question::{MAX_OPTIONS, QuestionType};

/// Committed options a question may hold.
pub const MAX_COMMITTED: usize = MAX_OPTIONS;

// ====================================
// DATA STRUCTURES

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Empty until the option is committed.
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    /// The inline "add answer" row.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_empty()
    }
}

/// `options` / `answer` pair as the question endpoints expect it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPayload {
    pub options: Vec<String>,
    pub answer: Vec<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerListError {
    #[error("answer text must not be empty")]
    EmptyAnswer,
    #[error("there is no pending answer to commit")]
    NoPendingSlot,
}

pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids: `{prefix}1`, `{prefix}2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

pub type ChangeListener = Box<dyn FnMut(Vec<AnswerOption>) + Send>;

// ====================================
// ANSWER LIST EDITOR

/// Ordered answer options with at most [`MAX_COMMITTED`] committed entries and
/// at most one pending slot.
///
/// Every change builds a fresh list, stores it and hands a copy to the
/// registered listener. Operations on unknown ids do nothing.
pub struct AnswerList<G = UuidGenerator> {
    answers: Vec<AnswerOption>,
    question_type: Option<QuestionType>,
    ids: G,
    listener: Option<ChangeListener>,
}

impl<G: IdGenerator> AnswerList<G> {
    /// Seeds the list. An empty seed yields a single pending slot; extra
    /// pending slots and committed entries past the cap are dropped.
    pub fn new(seed: Vec<AnswerOption>, question_type: Option<QuestionType>, ids: G) -> Self {
        let mut answers = Vec::with_capacity(MAX_COMMITTED + 1);
        for option in seed {
            let keep = if option.is_pending() {
                !answers.iter().any(AnswerOption::is_pending)
            } else {
                count_committed(&answers) < MAX_COMMITTED
            };
            if keep {
                answers.push(option);
            }
        }
        if answers.is_empty() {
            answers.push(AnswerOption::pending());
        }

        Self {
            answers,
            question_type,
            ids,
            listener: None,
        }
    }

    /// Builds the list from a stored question's `options` and correct indices.
    pub fn from_payload(
        options: &[String],
        answer: &[i64],
        question_type: Option<QuestionType>,
        mut ids: G,
    ) -> Self {
        let mut seed: Vec<AnswerOption> = options
            .iter()
            .take(MAX_COMMITTED)
            .enumerate()
            .map(|(index, text)| AnswerOption {
                id: ids.next_id(),
                text: text.clone(),
                is_correct: answer.contains(&(index as i64)),
            })
            .collect();
        if seed.len() < MAX_COMMITTED {
            seed.push(AnswerOption::pending());
        }
        Self::new(seed, question_type, ids)
    }

    pub fn on_change<F>(mut self, listener: F) -> Self
    where
        F: FnMut(Vec<AnswerOption>) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn answers(&self) -> &[AnswerOption] {
        &self.answers
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        self.question_type
    }

    pub fn pending(&self) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.is_pending())
    }

    pub fn committed(&self) -> impl Iterator<Item = &AnswerOption> {
        self.answers.iter().filter(|a| !a.is_pending())
    }

    pub fn committed_count(&self) -> usize {
        count_committed(&self.answers)
    }

    /// Whether the add action should be enabled.
    pub fn can_commit(&self) -> bool {
        self.pending()
            .is_some_and(|pending| !pending.text.trim().is_empty())
    }

    /// Replaces the text of the option with `target_id`. The pending slot is
    /// addressed by the empty id.
    pub fn edit_text(&mut self, target_id: &str, text: impl Into<String>) -> bool {
        if !self.answers.iter().any(|a| a.id == target_id) {
            return false;
        }
        let text = text.into();
        let next = self
            .answers
            .iter()
            .map(|a| {
                if a.id == target_id {
                    AnswerOption {
                        text: text.clone(),
                        ..a.clone()
                    }
                } else {
                    a.clone()
                }
            })
            .collect();
        self.replace(next);
        true
    }

    /// Single-choice: the target becomes the only correct option.
    /// Otherwise the target's flag flips and the rest stay as they are.
    pub fn toggle_correct(&mut self, target_id: &str) -> bool {
        if target_id.is_empty() || !self.answers.iter().any(|a| a.id == target_id) {
            return false;
        }
        let exclusive = self.question_type.is_some_and(QuestionType::is_exclusive);
        let next = self
            .answers
            .iter()
            .map(|a| {
                let is_correct = match (a.id == target_id, exclusive) {
                    (true, true) => true,
                    (true, false) => !a.is_correct,
                    (false, true) => false,
                    (false, false) => a.is_correct,
                };
                AnswerOption {
                    is_correct,
                    ..a.clone()
                }
            })
            .collect();
        self.replace(next);
        true
    }

    /// Gives the pending option an id and, below the cap, opens a new pending slot.
    pub fn commit_pending(&mut self) -> Result<(), AnswerListError> {
        let index = self
            .answers
            .iter()
            .position(AnswerOption::is_pending)
            .ok_or(AnswerListError::NoPendingSlot)?;
        if self.answers[index].text.trim().is_empty() {
            return Err(AnswerListError::EmptyAnswer);
        }

        let mut next = self.answers.clone();
        next[index].id = self.ids.next_id();
        if count_committed(&next) < MAX_COMMITTED {
            next.push(AnswerOption::pending());
        }
        self.replace(next);
        Ok(())
    }

    pub fn remove_committed(&mut self, target_id: &str) -> bool {
        if target_id.is_empty() {
            return false;
        }
        let Some(index) = self.answers.iter().position(|a| a.id == target_id) else {
            return false;
        };

        let mut next = self.answers.clone();
        next.remove(index);
        if count_committed(&next) < MAX_COMMITTED && !next.iter().any(AnswerOption::is_pending) {
            next.push(AnswerOption::pending());
        }
        self.replace(next);
        true
    }

    /// Clears every correct flag whenever the question type actually changes.
    pub fn set_question_type(&mut self, question_type: Option<QuestionType>) -> bool {
        if self.question_type == question_type {
            return false;
        }
        self.question_type = question_type;
        let next = self
            .answers
            .iter()
            .map(|a| AnswerOption {
                is_correct: false,
                ..a.clone()
            })
            .collect();
        self.replace(next);
        true
    }

    /// Committed options in order, with the indices of the correct ones.
    pub fn to_payload(&self) -> AnswerPayload {
        let mut payload = AnswerPayload::default();
        for (index, option) in self.committed().enumerate() {
            payload.options.push(option.text.clone());
            if option.is_correct {
                payload.answer.push(index as i64);
            }
        }
        payload
    }

    pub fn into_answers(self) -> Vec<AnswerOption> {
        self.answers
    }

    fn replace(&mut self, next: Vec<AnswerOption>) {
        self.answers = next;
        if let Some(listener) = self.listener.as_mut() {
            listener(self.answers.clone());
        }
    }
}

impl<G> fmt::Debug for AnswerList<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerList")
            .field("answers", &self.answers)
            .field("question_type", &self.question_type)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

fn count_committed(answers: &[AnswerOption]) -> usize {
    answers.iter().filter(|a| !a.is_pending()).count()
}
