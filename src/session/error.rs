use thiserror::Error;

use crate::model::ResourceType;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Why an operation was refused. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("no lesson is selected")]
    NoLessonSelected,
    #[error("the active lesson is not a video")]
    NotAVideoLesson,
    #[error("the active lesson is not a quiz")]
    NotAQuizLesson,
    #[error("every question needs an answer before submitting")]
    QuizIncomplete,
    #[error("the quiz has already been submitted")]
    QuizAlreadySubmitted,
    #[error("the quiz has no questions")]
    QuizEmpty,
    #[error("option index is out of range")]
    OptionOutOfRange,
    #[error("note content is empty")]
    EmptyNote,
    #[error("volume must be a number")]
    InvalidVolume,
    #[error("unsupported playback rate")]
    InvalidPlaybackRate,
    #[error("there is no next lesson")]
    NoNextLesson,
    #[error("there is no previous lesson")]
    NoPreviousLesson,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("not found: {resource_type:?}")]
    NotFound { resource_type: ResourceType },
    #[error("rejected: {0}")]
    Rejected(#[from] Precondition),
}

impl SessionError {
    pub fn not_found(resource_type: ResourceType) -> Self {
        Self::NotFound { resource_type }
    }
}
