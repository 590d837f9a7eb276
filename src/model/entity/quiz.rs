use serde::{Deserialize, Serialize};

use crate::model::repo::{ResourceType, ResourceTyped};

pub type QuestionId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizQuestion {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl ResourceTyped for QuizQuestion {
    fn get_resource_type() -> ResourceType {
        ResourceType::Question
    }
}

impl QuizQuestion {
    pub fn new<S: Into<String>>(
        id: QuestionId,
        question: S,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            options,
            correct_answer,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_answer == option
    }
}
