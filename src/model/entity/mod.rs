mod course;
pub use course::{Course, CourseId, Level};

mod module;
pub use module::{Module, ModuleId};

mod lesson;
pub use lesson::{Lesson, LessonId, LessonType};

mod review;
pub use review::Review;

mod quiz;
pub use quiz::{QuestionId, QuizQuestion};

mod workshop;
pub use workshop::Workshop;
