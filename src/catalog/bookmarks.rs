use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::entity::{Course, CourseId};

/// Process-local bookmark flags layered over the catalog's static ones.
#[derive(Debug, Default)]
pub struct Bookmarks {
    overrides: Mutex<HashMap<CourseId, bool>>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bookmarked(&self, course: &Course) -> bool {
        let overrides = self.overrides.lock().unwrap_or_else(|e| e.into_inner());
        overrides
            .get(&course.id())
            .copied()
            .unwrap_or(course.is_bookmarked())
    }

    /// Flips the flag and returns the new state.
    pub fn toggle(&self, course: &Course) -> bool {
        let mut overrides = self.overrides.lock().unwrap_or_else(|e| e.into_inner());
        let current = overrides
            .get(&course.id())
            .copied()
            .unwrap_or(course.is_bookmarked());
        overrides.insert(course.id(), !current);
        !current
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn toggle_starts_from_static_flag() {
        let marked: Course =
            serde_json::from_value(json!({ "id": 1, "is_bookmarked": true })).unwrap();
        let plain: Course = serde_json::from_value(json!({ "id": 2 })).unwrap();
        let bookmarks = Bookmarks::new();

        assert!(!bookmarks.toggle(&marked));
        assert!(!bookmarks.is_bookmarked(&marked));
        assert!(bookmarks.toggle(&plain));
        assert!(bookmarks.toggle(&marked));
        assert!(bookmarks.is_bookmarked(&plain));
    }
}
