use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A one-shot deferred callback bound to the lifetime of its handle.
///
/// The callback runs once after `delay` unless the handle is cancelled or
/// dropped first. Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct ScopedTimer {
    token: CancellationToken,
}

impl ScopedTimer {
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    tracing::trace!("scheduled callback suppressed");
                }
                _ = tokio::time::sleep(delay) => {
                    if !cancelled.is_cancelled() {
                        callback();
                    }
                }
            }
        });

        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
