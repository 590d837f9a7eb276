use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::{CourseId, Lesson, LessonId, QuestionId, QuizQuestion};
use crate::session::notes::{Note, NoteId};
use crate::session::quiz::{QuizAttempt, QuizOutcome, QuizPhase};
use crate::session::transport::TransportState;
use crate::session::{LessonSession, SessionState};
use crate::utils::format::format_time;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SessionCreateRequest {
    pub course_id: CourseId,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SelectLessonRequest {
    pub lesson_id: LessonId,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NoteRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AnswerRequest {
    pub question_id: QuestionId,
    pub option: usize,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteResponse {
    pub id: NoteId,
    pub time: f64,
    /// `time` as `mm:ss`
    pub timestamp: String,
    pub content: String,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id(),
            time: note.time(),
            timestamp: format_time(note.time()),
            content: note.content().to_string(),
        }
    }
}

/// A question as shown to the learner, without the correct option.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuestionResponse {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            id: question.id(),
            question: question.question().to_string(),
            options: question.options().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct QuizResponse {
    pub phase: QuizPhase,
    pub questions: Vec<QuestionResponse>,
    pub answers: BTreeMap<QuestionId, usize>,
    pub outcome: Option<QuizOutcome>,
}

impl From<&QuizAttempt> for QuizResponse {
    fn from(quiz: &QuizAttempt) -> Self {
        Self {
            phase: quiz.phase(),
            questions: quiz.questions().iter().map(QuestionResponse::from).collect(),
            answers: quiz.answers().clone(),
            outcome: quiz.outcome().cloned(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub course_id: CourseId,
    pub state: SessionState,
    pub lesson: Option<Lesson>,
    pub transport: TransportState,
    pub notes: Vec<NoteResponse>,
    pub quiz: Option<QuizResponse>,
    pub completion_percent: u8,
}

impl SessionResponse {
    pub fn new(id: Uuid, session: &LessonSession) -> Self {
        Self {
            id,
            course_id: session.course().id(),
            state: session.state(),
            lesson: session.current_lesson().cloned(),
            transport: *session.transport_state(),
            notes: session.notes().iter().map(NoteResponse::from).collect(),
            quiz: session.quiz().map(QuizResponse::from),
            completion_percent: session.completion_percent(),
        }
    }
}
