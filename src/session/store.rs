use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use uuid::Uuid;

use crate::model::{ResourceType, ResourceTyped};
use crate::session::controller::LessonSession;
use crate::session::error::{SessionError, SessionResult};
use crate::utils::timer::ScopedTimer;

pub type SessionId = Uuid;

impl ResourceTyped for LessonSession {
    fn get_resource_type() -> ResourceType {
        ResourceType::Session
    }
}

struct Entry {
    owner: Uuid,
    session: LessonSession,
    armed: u64,
    _expiry: ScopedTimer,
}

type Sessions = Mutex<HashMap<SessionId, Entry>>;

/// Open lesson sessions keyed by id, each bound to the user that opened it.
///
/// A session belonging to someone else is reported as missing. Sessions the
/// owner has not touched for `idle_after` are closed automatically.
pub struct SessionStore {
    sessions: Arc<Sessions>,
    next_arm: AtomicU64,
    idle_after: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("open", &self.len())
            .field("idle_after", &self.idle_after)
            .finish()
    }
}

impl SessionStore {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_arm: AtomicU64::new(0),
            idle_after,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn create(&self, owner: Uuid, session: LessonSession) -> SessionId {
        let id = Uuid::new_v4();
        let (armed, expiry) = self.arm(id);
        lock(&self.sessions).insert(
            id,
            Entry {
                owner,
                session,
                armed,
                _expiry: expiry,
            },
        );
        tracing::debug!(%id, %owner, "session opened");
        id
    }

    /// Runs `f` against the owner's session while holding the store lock.
    ///
    /// Any access by the owner restarts the idle countdown.
    pub fn with_session<T, F>(&self, owner: Uuid, id: SessionId, f: F) -> SessionResult<T>
    where
        F: FnOnce(&mut LessonSession) -> SessionResult<T>,
    {
        let mut sessions = lock(&self.sessions);
        match sessions.get_mut(&id) {
            Some(entry) if entry.owner == owner => {
                let (armed, expiry) = self.arm(id);
                entry.armed = armed;
                entry._expiry = expiry;
                f(&mut entry.session)
            }
            _ => Err(SessionError::not_found(LessonSession::get_resource_type())),
        }
    }

    pub fn close(&self, owner: Uuid, id: SessionId) -> SessionResult<()> {
        let mut sessions = lock(&self.sessions);
        match sessions.get(&id) {
            Some(entry) if entry.owner == owner => {
                sessions.remove(&id);
                tracing::debug!(%id, "session closed");
                Ok(())
            }
            _ => Err(SessionError::not_found(LessonSession::get_resource_type())),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Schedules removal of `id` after the idle period.
    ///
    /// Only the most recent arming of an entry may remove it.
    fn arm(&self, id: SessionId) -> (u64, ScopedTimer) {
        let armed = self.next_arm.fetch_add(1, Ordering::Relaxed);
        let owner: Weak<Sessions> = Arc::downgrade(&self.sessions);
        let expiry = ScopedTimer::schedule(self.idle_after, move || {
            let Some(sessions) = owner.upgrade() else {
                return;
            };
            let mut sessions = lock(&sessions);
            if sessions.get(&id).is_some_and(|entry| entry.armed == armed) {
                sessions.remove(&id);
                tracing::debug!(%id, "idle session closed");
            }
        });
        (armed, expiry)
    }
}

fn lock(sessions: &Sessions) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
    sessions
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
