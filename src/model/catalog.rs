use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::model::entity::{Course, CourseId, LessonId, QuizQuestion, Workshop};
use crate::model::error::{CatalogError, CatalogResult};
use crate::model::repo::CourseRepository;

static SEED: &[u8] = include_bytes!("../../data/catalog.json");

/// Quiz questions per course, then per lesson.
type QuizTable = HashMap<CourseId, HashMap<LessonId, Vec<QuizQuestion>>>;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    courses: Vec<Course>,
    #[serde(default)]
    quizzes: QuizTable,
    #[serde(default)]
    workshops: Vec<Workshop>,
    #[serde(default)]
    categories: Vec<String>,
}

/// In-memory catalog, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    courses: Vec<Course>,
    quizzes: QuizTable,
    workshops: Vec<Workshop>,
    categories: Vec<String>,
}

impl StaticCatalog {
    /// Catalog bundled with the binary.
    pub fn seed() -> CatalogResult<Self> {
        Self::from_slice(SEED)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let bytes = std::fs::read(path)?;
        tracing::debug!("loading catalog from {}", path.display());
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> CatalogResult<Self> {
        let doc: CatalogDocument = serde_json::from_slice(bytes)?;
        Self::from_parts(doc.courses, doc.quizzes, doc.workshops, doc.categories)
    }

    pub fn from_courses(courses: Vec<Course>) -> CatalogResult<Self> {
        Self::from_parts(courses, HashMap::new(), Vec::new(), Vec::new())
    }

    pub fn with_quiz(
        mut self,
        course_id: CourseId,
        lesson_id: LessonId,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        self.quizzes
            .entry(course_id)
            .or_default()
            .insert(lesson_id, questions);
        self
    }

    fn from_parts(
        courses: Vec<Course>,
        quizzes: QuizTable,
        workshops: Vec<Workshop>,
        categories: Vec<String>,
    ) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.id()) {
                return Err(CatalogError::DuplicateCourse(course.id()));
            }

            let mut lessons = HashSet::new();
            if let Some(lesson) = course.lessons_in_order().find(|l| !lessons.insert(l.id())) {
                return Err(CatalogError::DuplicateLesson {
                    course: course.id(),
                    lesson: lesson.id(),
                });
            }

            // loaded as-is, only reported
            if course.price() > course.original_price() {
                tracing::warn!(
                    course_id = course.id(),
                    price = course.price(),
                    original_price = course.original_price(),
                    "course price exceeds its original price"
                );
            }
        }

        tracing::debug!(
            "catalog loaded: {} courses, {} quizzes, {} workshops",
            courses.len(),
            quizzes.values().map(HashMap::len).sum::<usize>(),
            workshops.len()
        );

        Ok(Self {
            courses,
            quizzes,
            workshops,
            categories,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

#[async_trait::async_trait]
impl CourseRepository for StaticCatalog {
    async fn all(&self) -> Vec<Course> {
        self.courses.clone()
    }

    async fn find_by_id(&self, id: CourseId) -> Option<Course> {
        self.courses.iter().find(|c| c.id() == id).cloned()
    }

    async fn quiz_for(&self, course_id: CourseId, lesson_id: LessonId) -> Vec<QuizQuestion> {
        self.quizzes
            .get(&course_id)
            .and_then(|lessons| lessons.get(&lesson_id))
            .cloned()
            .unwrap_or_default()
    }

    async fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    async fn workshops(&self) -> Vec<Workshop> {
        self.workshops.clone()
    }

    async fn count(&self) -> usize {
        self.courses.len()
    }
}
