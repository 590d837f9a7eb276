use crate::model::entity::{Course, CourseId, LessonId, QuizQuestion, Workshop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Course,
    Module,
    Lesson,
    Question,
    Note,
    Session,
    Notification,
    Workshop,
    Mentorship,
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// Read-only lookup over the course catalog.
///
/// Consumers only ever see entities, never the layout of the backing document.
#[async_trait::async_trait]
pub trait CourseRepository: Send + Sync + std::fmt::Debug {
    async fn all(&self) -> Vec<Course>;

    async fn find_by_id(&self, id: CourseId) -> Option<Course>;

    /// Questions of a quiz lesson, empty if none are defined.
    ///
    /// Lesson ids are only unique within their course.
    async fn quiz_for(&self, course_id: CourseId, lesson_id: LessonId) -> Vec<QuizQuestion>;

    async fn categories(&self) -> Vec<String>;

    async fn workshops(&self) -> Vec<Workshop>;

    async fn count(&self) -> usize {
        self.all().await.len()
    }

    /// Enrolled courses in catalog order, at most `limit` of them.
    async fn enrolled(&self, limit: usize) -> Vec<Course> {
        self.all()
            .await
            .into_iter()
            .filter(|c| c.is_enrolled())
            .take(limit)
            .collect()
    }
}
