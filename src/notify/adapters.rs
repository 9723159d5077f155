//! Notification dispatcher adapters for tests and wiring without delivery.

use super::{DispatchError, NotificationDispatcher, NotificationEvent};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Dispatcher that records every event for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    events: Arc<RwLock<Vec<NotificationEvent>>>,
}

impl RecordingDispatcher {
    /// Creates an empty recording dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every event dispatched so far.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: NotificationEvent) -> Result<(), DispatchError> {
        self.events
            .write()
            .map_err(|err| DispatchError::new(std::io::Error::other(err.to_string())))?
            .push(event);
        Ok(())
    }
}

/// Dispatcher that silently drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDispatcher;

#[async_trait]
impl NotificationDispatcher for NullDispatcher {
    async fn dispatch(&self, _event: NotificationEvent) -> Result<(), DispatchError> {
        Ok(())
    }
}
