use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::entity::{Course, Lesson, LessonId, LessonType, QuestionId, QuizQuestion};
use crate::model::ResourceTyped;
use crate::session::error::{Precondition, SessionError, SessionResult};
use crate::session::notes::{Note, NoteId, Notes};
use crate::session::quiz::{QuizAttempt, QuizOutcome, QuizPhase};
use crate::session::transport::{TransportAction, TransportState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    PlayingVideo { lesson_id: LessonId },
    TakingQuiz { lesson_id: LessonId, phase: QuizPhase },
    Reading { lesson_id: LessonId },
}

/// Learner-side state for one course: selected lesson, media transport,
/// notes and the current quiz attempt.
///
/// Lives exactly as long as the viewing session; nothing here is shared or
/// persisted.
#[derive(Debug, Clone)]
pub struct LessonSession {
    course: Course,
    quizzes: HashMap<LessonId, Vec<QuizQuestion>>,
    current: Option<LessonId>,
    transport: TransportState,
    notes: Notes,
    quiz: Option<QuizAttempt>,
    completed: HashSet<LessonId>,
}

impl LessonSession {
    /// A session with nothing selected.
    pub fn new(course: Course, quizzes: HashMap<LessonId, Vec<QuizQuestion>>) -> Self {
        Self {
            course,
            quizzes,
            current: None,
            transport: TransportState::default(),
            notes: Notes::default(),
            quiz: None,
            completed: HashSet::new(),
        }
    }

    /// A session positioned on the first lesson of the first module, if any.
    pub fn open(course: Course, quizzes: HashMap<LessonId, Vec<QuizQuestion>>) -> Self {
        let mut session = Self::new(course, quizzes);
        if let Some(first) = session.course.first_lesson().map(Lesson::id) {
            session.enter(first);
        }
        session
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.current.and_then(|id| self.course.lesson(id))
    }

    pub fn transport_state(&self) -> &TransportState {
        &self.transport
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn quiz(&self) -> Option<&QuizAttempt> {
        self.quiz.as_ref()
    }

    pub fn state(&self) -> SessionState {
        let Some(lesson) = self.current_lesson() else {
            return SessionState::Idle;
        };

        let lesson_id = lesson.id();
        match lesson.lesson_type() {
            LessonType::Video => SessionState::PlayingVideo { lesson_id },
            LessonType::Quiz => SessionState::TakingQuiz {
                lesson_id,
                phase: self
                    .quiz
                    .as_ref()
                    .map(QuizAttempt::phase)
                    .unwrap_or(QuizPhase::Unanswered),
            },
            LessonType::Text => SessionState::Reading { lesson_id },
        }
    }

    // Lesson navigation

    /// Switching lessons always throws away the running quiz attempt, even
    /// when the same quiz is selected again.
    pub fn select_lesson(&mut self, lesson_id: LessonId) -> SessionResult<&Lesson> {
        if self.course.lesson(lesson_id).is_none() {
            return Err(SessionError::not_found(Lesson::get_resource_type()));
        }

        self.enter(lesson_id);
        self.current_lesson()
            .ok_or_else(|| SessionError::not_found(Lesson::get_resource_type()))
    }

    pub fn next_lesson(&mut self) -> SessionResult<&Lesson> {
        let order = self.lesson_order();
        let next = match self.current {
            None => order.first().copied(),
            Some(current) => order
                .iter()
                .position(|id| *id == current)
                .and_then(|pos| order.get(pos + 1).copied()),
        };

        match next {
            Some(id) => self.select_lesson(id),
            None => Err(Precondition::NoNextLesson.into()),
        }
    }

    pub fn previous_lesson(&mut self) -> SessionResult<&Lesson> {
        let order = self.lesson_order();
        let previous = self.current.and_then(|current| {
            order
                .iter()
                .position(|id| *id == current)
                .filter(|pos| *pos > 0)
                .map(|pos| order[pos - 1])
        });

        match previous {
            Some(id) => self.select_lesson(id),
            None => Err(Precondition::NoPreviousLesson.into()),
        }
    }

    pub fn mark_complete(&mut self) -> SessionResult<LessonId> {
        let lesson_id = self.current.ok_or(Precondition::NoLessonSelected)?;
        self.completed.insert(lesson_id);
        tracing::debug!(lesson_id, "lesson marked as complete");
        Ok(lesson_id)
    }

    pub fn is_lesson_completed(&self, lesson_id: LessonId) -> bool {
        self.completed.contains(&lesson_id)
            || self
                .course
                .lesson(lesson_id)
                .is_some_and(Lesson::is_completed)
    }

    /// Completed lessons as a whole percentage of the curriculum.
    pub fn completion_percent(&self) -> u8 {
        let total = self.course.lessons_in_order().count();
        if total == 0 {
            return 0;
        }
        let done = self
            .course
            .lessons_in_order()
            .filter(|l| self.is_lesson_completed(l.id()))
            .count();
        (done * 100 / total) as u8
    }

    // Transport

    pub fn transport(&mut self, action: TransportAction) -> SessionResult<&TransportState> {
        self.require_video()?;
        self.transport.apply(action)?;
        Ok(&self.transport)
    }

    // Notes

    /// Stamps the note with the current playback position.
    pub fn add_note<S: Into<String>>(&mut self, content: S) -> SessionResult<&Note> {
        self.require_video()?;
        let time = self.transport.current_time();
        Ok(self.notes.add(time, content.into())?)
    }

    pub fn edit_note<S: Into<String>>(&mut self, id: NoteId, content: S) -> SessionResult<&Note> {
        self.notes
            .edit(id, content.into())
            .ok_or_else(|| SessionError::not_found(Note::get_resource_type()))
    }

    pub fn delete_note(&mut self, id: NoteId) -> SessionResult<Note> {
        self.notes
            .delete(id)
            .ok_or_else(|| SessionError::not_found(Note::get_resource_type()))
    }

    /// Moves playback to the note's position; play/pause is left as is.
    pub fn jump_to_note(&mut self, id: NoteId) -> SessionResult<&TransportState> {
        let time = self
            .notes
            .get(id)
            .map(Note::time)
            .ok_or_else(|| SessionError::not_found(Note::get_resource_type()))?;
        self.require_video()?;
        self.transport.seek(time);
        Ok(&self.transport)
    }

    // Quiz

    pub fn answer(&mut self, question_id: QuestionId, option: usize) -> SessionResult<()> {
        self.active_quiz()?.answer(question_id, option)
    }

    pub fn submit_quiz(&mut self) -> SessionResult<QuizOutcome> {
        let outcome = self.active_quiz()?.submit()?.clone();
        tracing::debug!(
            score = outcome.score(),
            total = outcome.total(),
            passed = outcome.passed(),
            "quiz submitted"
        );
        Ok(outcome)
    }

    pub fn retake_quiz(&mut self) -> SessionResult<()> {
        self.active_quiz()?.retake();
        Ok(())
    }

    fn enter(&mut self, lesson_id: LessonId) {
        let is_quiz = self.course.lesson(lesson_id).is_some_and(Lesson::is_quiz);

        self.current = Some(lesson_id);
        self.transport = TransportState::default();
        self.quiz = is_quiz.then(|| {
            QuizAttempt::new(self.quizzes.get(&lesson_id).cloned().unwrap_or_default())
        });

        tracing::debug!(course_id = self.course.id(), lesson_id, "lesson selected");
    }

    fn lesson_order(&self) -> Vec<LessonId> {
        self.course.lessons_in_order().map(Lesson::id).collect()
    }

    fn require_video(&self) -> Result<(), Precondition> {
        match self.current_lesson() {
            None => Err(Precondition::NoLessonSelected),
            Some(lesson) if lesson.is_video() => Ok(()),
            Some(_) => Err(Precondition::NotAVideoLesson),
        }
    }

    fn active_quiz(&mut self) -> SessionResult<&mut QuizAttempt> {
        self.quiz
            .as_mut()
            .ok_or(SessionError::Rejected(Precondition::NotAQuizLesson))
    }
}
