use serde::{Deserialize, Serialize};

use crate::model::repo::{ResourceType, ResourceTyped};

pub type LessonId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    #[default]
    Video,
    Quiz,
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Lesson {
    id: LessonId,
    title: String,
    /// `mm:ss`
    duration: String,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    is_preview: bool,
    #[serde(rename = "type", default)]
    lesson_type: LessonType,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> ResourceType {
        ResourceType::Lesson
    }
}

impl Lesson {
    pub fn new<S: Into<String>>(id: LessonId, title: S, duration: S, lesson_type: LessonType) -> Self {
        Self {
            id,
            title: title.into(),
            duration: duration.into(),
            is_completed: false,
            is_preview: false,
            lesson_type,
        }
    }

    pub fn id(&self) -> LessonId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// `duration` in seconds, `None` when it is not `mm:ss`.
    pub fn duration_secs(&self) -> Option<u32> {
        crate::utils::format::parse_duration(&self.duration)
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    pub fn lesson_type(&self) -> LessonType {
        self.lesson_type
    }

    pub fn is_video(&self) -> bool {
        self.lesson_type == LessonType::Video
    }

    pub fn is_quiz(&self) -> bool {
        self.lesson_type == LessonType::Quiz
    }
}
