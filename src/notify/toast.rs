use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ResourceType, ResourceTyped};
use crate::notify::{NotificationSink, Severity};
use crate::utils::timer::ScopedTimer;

pub type ToastId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Toast {
    id: ToastId,
    message: String,
    severity: Severity,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Toast {
    fn get_resource_type() -> ResourceType {
        ResourceType::Notification
    }
}

impl Toast {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug)]
struct Entry {
    toast: Toast,
    _dismiss: ScopedTimer,
}

type Toasts = Mutex<BTreeMap<ToastId, Entry>>;

/// Live toasts, each removed automatically after `dismiss_after`.
///
/// Pending dismissals are cancelled when the center is dropped.
#[derive(Debug)]
pub struct ToastCenter {
    toasts: Arc<Toasts>,
    next_id: AtomicU64,
    dismiss_after: Duration,
}

impl ToastCenter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: AtomicU64::new(1),
            dismiss_after,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn push<S: Into<String>>(&self, message: S, severity: Severity) -> Toast {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };

        let owner: Weak<Toasts> = Arc::downgrade(&self.toasts);
        let dismiss = ScopedTimer::schedule(self.dismiss_after, move || {
            if let Some(toasts) = owner.upgrade() {
                lock(&toasts).remove(&id);
                tracing::trace!(id, "toast expired");
            }
        });

        tracing::debug!(id, ?severity, "{}", toast.message);
        lock(&self.toasts).insert(
            id,
            Entry {
                toast: toast.clone(),
                _dismiss: dismiss,
            },
        );
        toast
    }

    /// Removes a toast before it expires. `None` if it is already gone.
    pub fn dismiss(&self, id: ToastId) -> Option<Toast> {
        lock(&self.toasts).remove(&id).map(|entry| entry.toast)
    }

    /// Live toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        lock(&self.toasts)
            .values()
            .map(|entry| entry.toast.clone())
            .collect()
    }
}

impl NotificationSink for ToastCenter {
    fn notify(&self, message: &str, severity: Severity) {
        self.push(message, severity);
    }
}

fn lock(toasts: &Toasts) -> MutexGuard<'_, BTreeMap<ToastId, Entry>> {
    toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
