//! Notification dispatcher port and fire-and-forget helper.

use super::NotificationEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a notification dispatcher.
#[derive(Debug, Clone, Error)]
#[error("notification dispatch failed: {0}")]
pub struct DispatchError(Arc<dyn std::error::Error + Send + Sync>);

impl DispatchError {
    /// Wraps an underlying delivery error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Outbound notification contract.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when delivery fails; callers on the core
    /// write path log and continue rather than propagate.
    async fn dispatch(&self, event: NotificationEvent) -> Result<(), DispatchError>;
}

/// Dispatches an event without letting delivery failures affect the caller.
///
/// Failures are logged at `warn`; the core operation has already committed
/// by the time this runs.
pub async fn dispatch_fire_and_forget(
    dispatcher: &dyn NotificationDispatcher,
    event: NotificationEvent,
) {
    if let Err(err) = dispatcher.dispatch(event).await {
        tracing::warn!(error = %err, "notification dispatch failed");
    }
}
