use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::catalog::query::{CatalogQuery, query};
use crate::model::entity::Course;
use crate::utils::timer::ScopedTimer;

/// What a catalog listing looks like to the caller: still loading, or loaded
/// with a (possibly empty) result.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogView {
    Loading,
    Loaded {
        courses: Vec<Course>,
        /// Size of the whole catalog, not of the result.
        total: usize,
    },
}

impl CatalogView {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn courses(&self) -> &[Course] {
        match self {
            Self::Loading => &[],
            Self::Loaded { courses, .. } => courses,
        }
    }
}

/// Gates catalog reads behind a simulated network delay.
#[derive(Debug)]
pub struct CatalogLoader {
    loaded: Arc<AtomicBool>,
    _timer: Option<ScopedTimer>,
}

impl CatalogLoader {
    /// Marks the catalog as loaded once `delay` has elapsed. A zero delay is
    /// loaded immediately. Dropping the loader cancels a pending delay.
    pub fn start(delay: Duration) -> Self {
        if delay.is_zero() {
            return Self::loaded();
        }

        let loaded = Arc::new(AtomicBool::new(false));
        let flag = loaded.clone();
        let timer = ScopedTimer::schedule(delay, move || {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("catalog marked as loaded");
        });

        Self {
            loaded,
            _timer: Some(timer),
        }
    }

    pub fn loaded() -> Self {
        Self {
            loaded: Arc::new(AtomicBool::new(true)),
            _timer: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn view(&self, courses: &[Course], params: &CatalogQuery) -> CatalogView {
        if !self.is_loaded() {
            return CatalogView::Loading;
        }

        CatalogView::Loaded {
            courses: query(courses, params),
            total: courses.len(),
        }
    }
}
