use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::entity::{QuestionId, QuizQuestion};
use crate::model::ResourceTyped;
use crate::session::error::{Precondition, SessionError, SessionResult};

/// Share of correct answers needed to pass.
pub const PASS_THRESHOLD: f64 = 0.8;

const PASSED_MESSAGE: &str = "Excellent work! You've mastered the concepts.";
const FAILED_MESSAGE: &str = "Good effort! Review the lessons and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Unanswered,
    Answered,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct QuizOutcome {
    score: usize,
    total: usize,
    passed: bool,
    message: String,
}

impl QuizOutcome {
    fn new(score: usize, total: usize) -> Self {
        let passed = total > 0 && score as f64 / total as f64 >= PASS_THRESHOLD;
        let message = if passed { PASSED_MESSAGE } else { FAILED_MESSAGE };
        Self {
            score,
            total,
            passed,
            message: message.to_string(),
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One attempt at a quiz lesson. Discarded on retake or lesson change.
#[derive(Debug, Clone, Default)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    answers: BTreeMap<QuestionId, usize>,
    outcome: Option<QuizOutcome>,
}

impl QuizAttempt {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: BTreeMap::new(),
            outcome: None,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, usize> {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> QuizPhase {
        if self.outcome.is_some() {
            QuizPhase::Submitted
        } else if self.answers.is_empty() {
            QuizPhase::Unanswered
        } else {
            QuizPhase::Answered
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty()
            && self
                .questions
                .iter()
                .all(|q| self.answers.contains_key(&q.id()))
    }

    /// Records or overwrites the answer to one question.
    pub fn answer(&mut self, question_id: QuestionId, option: usize) -> SessionResult<()> {
        if self.outcome.is_some() {
            return Err(Precondition::QuizAlreadySubmitted.into());
        }

        let question = self
            .questions
            .iter()
            .find(|q| q.id() == question_id)
            .ok_or_else(|| SessionError::not_found(QuizQuestion::get_resource_type()))?;

        if option >= question.options().len() {
            return Err(Precondition::OptionOutOfRange.into());
        }

        self.answers.insert(question_id, option);
        Ok(())
    }

    pub fn submit(&mut self) -> SessionResult<&QuizOutcome> {
        if self.outcome.is_some() {
            return Err(Precondition::QuizAlreadySubmitted.into());
        }
        if self.questions.is_empty() {
            return Err(Precondition::QuizEmpty.into());
        }
        if !self.is_complete() {
            return Err(Precondition::QuizIncomplete.into());
        }

        let score = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id()) == Some(&q.correct_answer()))
            .count();

        let outcome = self
            .outcome
            .insert(QuizOutcome::new(score, self.questions.len()));
        Ok(&*outcome)
    }

    pub fn retake(&mut self) {
        self.answers.clear();
        self.outcome = None;
    }
}
