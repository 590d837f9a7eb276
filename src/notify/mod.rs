//! Transient user notifications ("toasts").

mod toast;
pub use toast::{Toast, ToastCenter, ToastId};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Fire-and-forget delivery of a message to the user.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}
