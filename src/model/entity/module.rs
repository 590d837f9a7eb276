use serde::{Deserialize, Serialize};

use crate::model::entity::{Lesson, LessonId};
use crate::model::repo::{ResourceType, ResourceTyped};

pub type ModuleId = u32;

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Module {
    id: ModuleId,
    title: String,
    #[serde(default)]
    lessons: Vec<Lesson>,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> ResourceType {
        ResourceType::Module
    }
}

impl Module {
    pub fn new<S: Into<String>>(id: ModuleId, title: S, lessons: Vec<Lesson>) -> Self {
        Self {
            id,
            title: title.into(),
            lessons,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lessons in display order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id() == id)
    }
}
