use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::entity::{Lesson, LessonId, Module, Review};
use crate::model::repo::{ResourceType, ResourceTyped};

pub type CourseId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    #[serde(rename = "All Levels")]
    AllLevels,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::AllLevels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::AllLevels => "All Levels",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown level `{s}`"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Course {
    id: CourseId,
    title: String,
    instructor: String,
    instructor_image: String,
    instructor_bio: String,
    category: String,
    duration: String,
    lessons: u32,
    students: u64,
    rating: f32,
    review_count: u32,
    price: u64,
    original_price: u64,
    level: Level,
    thumbnail: String,
    preview_video: String,
    description: String,
    long_description: String,
    features: Vec<String>,
    learning_outcomes: Vec<String>,
    requirements: Vec<String>,
    is_enrolled: bool,
    progress: u8,
    is_bestseller: bool,
    is_new: bool,
    is_bookmarked: bool,
    language: String,
    last_updated: String,
    certificate: bool,
    curriculum: Vec<Module>,
    reviews: Vec<Review>,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> ResourceType {
        ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn instructor_bio(&self) -> &str {
        &self.instructor_bio
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn lesson_count(&self) -> u32 {
        self.lessons
    }

    pub fn students(&self) -> u64 {
        self.students
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn original_price(&self) -> u64 {
        self.original_price
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn learning_outcomes(&self) -> &[String] {
        &self.learning_outcomes
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn is_enrolled(&self) -> bool {
        self.is_enrolled
    }

    /// Only meaningful for enrolled courses, `None` otherwise.
    pub fn progress(&self) -> Option<u8> {
        self.is_enrolled.then_some(self.progress.min(100))
    }

    pub fn is_bestseller(&self) -> bool {
        self.is_bestseller
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_bookmarked(&self) -> bool {
        self.is_bookmarked
    }

    pub fn set_bookmarked(&mut self, bookmarked: bool) {
        self.is_bookmarked = bookmarked;
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn certificate(&self) -> bool {
        self.certificate
    }

    pub fn curriculum(&self) -> &[Module] {
        &self.curriculum
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn has_discount(&self) -> bool {
        self.original_price > self.price
    }

    /// Whole-percent discount off the original price; 0 when there is none.
    pub fn discount_percent(&self) -> u8 {
        if !self.has_discount() || self.original_price == 0 {
            return 0;
        }
        let off = (self.original_price - self.price) * 100 / self.original_price;
        off as u8
    }

    /// All lessons of the curriculum, flattened in navigation order.
    pub fn lessons_in_order(&self) -> impl Iterator<Item = &Lesson> {
        self.curriculum.iter().flat_map(|m| m.lessons().iter())
    }

    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.lessons_in_order().next()
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons_in_order().find(|l| l.id() == id)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn course(value: serde_json::Value) -> Course {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn level_uses_display_names() {
        let c = course(json!({ "id": 1, "level": "All Levels" }));
        assert_eq!(c.level(), Level::AllLevels);
        assert_eq!("Advanced".parse::<Level>(), Ok(Level::Advanced));
        assert!("advanced".parse::<Level>().is_err());
        assert_eq!(
            serde_json::to_value(Level::AllLevels).unwrap(),
            json!("All Levels")
        );
    }

    #[test]
    fn progress_only_when_enrolled() {
        let enrolled = course(json!({ "id": 1, "is_enrolled": true, "progress": 40 }));
        let browsing = course(json!({ "id": 2, "is_enrolled": false, "progress": 40 }));
        assert_eq!(enrolled.progress(), Some(40));
        assert_eq!(browsing.progress(), None);
    }

    #[test]
    fn discount() {
        let c = course(json!({ "id": 1, "price": 900000, "original_price": 1200000 }));
        assert!(c.has_discount());
        assert_eq!(c.discount_percent(), 25);

        let inverted = course(json!({ "id": 2, "price": 10, "original_price": 5 }));
        assert!(!inverted.has_discount());
        assert_eq!(inverted.discount_percent(), 0);
    }

    #[test]
    fn lessons_flatten_in_module_order() {
        let c = course(json!({
            "id": 1,
            "curriculum": [
                { "id": 1, "title": "M1", "lessons": [
                    { "id": 10, "title": "a", "duration": "01:00", "type": "video" },
                    { "id": 11, "title": "b", "duration": "01:00", "type": "text" }
                ]},
                { "id": 2, "title": "M2", "lessons": [
                    { "id": 5, "title": "c", "duration": "01:00", "type": "quiz" }
                ]}
            ]
        }));
        let ids: Vec<_> = c.lessons_in_order().map(|l| l.id()).collect();
        assert_eq!(ids, vec![10, 11, 5]);
        assert_eq!(c.first_lesson().map(|l| l.id()), Some(10));
        assert!(c.lesson(5).unwrap().is_quiz());
        assert!(c.lesson(99).is_none());
    }
}
