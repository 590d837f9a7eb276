use std::sync::Arc;

use crate::Config;
use crate::catalog::{Bookmarks, CatalogLoader};
use crate::model::ModelManager;
use crate::notify::ToastCenter;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    config: &'static Config,
    loader: Arc<CatalogLoader>,
    sessions: Arc<SessionStore>,
    toasts: Arc<ToastCenter>,
    bookmarks: Arc<Bookmarks>,
}

impl AppState {
    /// Starts the simulated catalog load, so it must run inside a tokio runtime.
    pub fn new(mm: ModelManager, config: &'static Config) -> Self {
        Self {
            mm,
            config,
            loader: Arc::new(CatalogLoader::start(config.app().load_delay())),
            sessions: Arc::new(SessionStore::new(config.app().session_idle())),
            toasts: Arc::new(ToastCenter::new(config.app().toast_dismiss())),
            bookmarks: Arc::new(Bookmarks::default()),
        }
    }

    pub fn mm(&self) -> &ModelManager {
        &self.mm
    }

    pub fn config(&self) -> &'static Config {
        self.config
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }
}
