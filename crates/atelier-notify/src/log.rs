//! # In-Memory Notification Log
//!
//! The delivery target the worker writes into and the read side the
//! API serves `GET /v1/notifications/:party_id` from. A real deployment
//! would put a push gateway behind the same trait.

use parking_lot::RwLock;

use atelier_core::PartyId;

use crate::event::Notification;

/// Where delivered notifications land.
pub trait NotificationSink: Send + Sync {
    /// Record one delivered notification.
    fn deliver(&self, notification: Notification);
}

/// An append-only in-memory sink, queryable per recipient.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RwLock<Vec<Notification>>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications addressed to one party, oldest first.
    pub fn for_recipient(&self, recipient: PartyId) -> Vec<Notification> {
        self.entries
            .read()
            .iter()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect()
    }

    /// Total number of delivered notifications.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been delivered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl NotificationSink for NotificationLog {
    fn deliver(&self, notification: Notification) {
        self.entries.write().push(notification);
    }
}

impl<S: NotificationSink> NotificationSink for std::sync::Arc<S> {
    fn deliver(&self, notification: Notification) {
        self.as_ref().deliver(notification);
    }
}
