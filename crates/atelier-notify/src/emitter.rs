//! # Notification Emitter
//!
//! The producer half of the notification channel. Emission is
//! fire-and-forget: the caller has already committed its transition,
//! and a full or closed channel must never fail the command that
//! triggered the event. Losses are logged and accepted.

use tokio::sync::mpsc;

use atelier_core::PartyId;

use crate::event::{Notification, NotificationEvent};

/// Hands notifications to the background worker without waiting.
#[derive(Debug, Clone)]
pub struct NotificationEmitter {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationEmitter {
    /// Create an emitter and the receiver a worker drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emit an event to one recipient. Never fails; if the worker is
    /// gone the notification is dropped with a warning.
    pub fn emit(&self, recipient: PartyId, event: NotificationEvent) {
        let notification = Notification::new(recipient, event);
        if let Err(err) = self.tx.send(notification) {
            tracing::warn!(
                recipient = %err.0.recipient,
                kind = err.0.event.kind(),
                "notification channel closed, dropping notification"
            );
        }
    }

    /// Emit the same event to several recipients.
    pub fn emit_all(&self, recipients: &[PartyId], event: &NotificationEvent) {
        for recipient in recipients {
            self.emit(*recipient, event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::OrderId;

    #[test]
    fn emit_reaches_receiver() {
        let (emitter, mut rx) = NotificationEmitter::channel();
        let recipient = PartyId::new();
        emitter.emit(
            recipient,
            NotificationEvent::OrderDelivered {
                order_id: OrderId::new(),
            },
        );

        let received = rx.try_recv().unwrap();
        assert_eq!(received.recipient, recipient);
        assert_eq!(received.event.kind(), "order_delivered");
    }

    #[test]
    fn emit_after_receiver_dropped_does_not_panic() {
        let (emitter, rx) = NotificationEmitter::channel();
        drop(rx);
        emitter.emit(
            PartyId::new(),
            NotificationEvent::OrderDelivered {
                order_id: OrderId::new(),
            },
        );
    }

    #[test]
    fn emit_all_fans_out() {
        let (emitter, mut rx) = NotificationEmitter::channel();
        let recipients = [PartyId::new(), PartyId::new()];
        emitter.emit_all(
            &recipients,
            &NotificationEvent::OrderDelivered {
                order_id: OrderId::new(),
            },
        );
        assert_eq!(rx.try_recv().unwrap().recipient, recipients[0]);
        assert_eq!(rx.try_recv().unwrap().recipient, recipients[1]);
    }
}
