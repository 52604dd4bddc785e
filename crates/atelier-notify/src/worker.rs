//! # Notification Worker
//!
//! Drains the mpsc channel into a [`NotificationSink`]. Exits when
//! every emitter has been dropped and the channel closes.

use tokio::sync::mpsc;

use crate::event::Notification;
use crate::log::NotificationSink;

/// Background consumer of emitted notifications.
pub struct NotificationWorker<S: NotificationSink> {
    sink: S,
}

impl<S: NotificationSink> NotificationWorker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Run until the channel closes.
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<Notification>) {
        tracing::info!("notification worker started");

        while let Some(notification) = rx.recv().await {
            tracing::debug!(
                id = %notification.id,
                recipient = %notification.recipient,
                kind = notification.event.kind(),
                "delivering notification"
            );
            self.sink.deliver(notification);
        }

        tracing::info!("notification channel closed, worker stopping");
    }
}
