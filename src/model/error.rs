use thiserror::Error;

use crate::model::entity::{CourseId, LessonId};

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("json error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("duplicate course id: {0}")]
    DuplicateCourse(CourseId),
    #[error("duplicate lesson id {lesson} in course {course}")]
    DuplicateLesson { course: CourseId, lesson: LessonId },
}
