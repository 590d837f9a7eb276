mod catalog;
pub use catalog::StaticCatalog;

pub mod entity;

mod error;
pub use error::{CatalogError, CatalogResult};

mod repo;
pub use repo::{CourseRepository, ResourceType, ResourceTyped};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ModelManager {
    repo: Arc<dyn CourseRepository>,
}

impl ModelManager {
    pub fn new<R: CourseRepository + 'static>(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    pub fn repo(&self) -> &dyn CourseRepository {
        self.repo.as_ref()
    }
}
