//! # Notification Events
//!
//! One variant per lifecycle event a party can be told about, each with
//! a fixed payload. The wire form is internally tagged so consumers can
//! dispatch on `type` without knowing every variant.

use serde::{Deserialize, Serialize};

use atelier_core::{DisputeId, ItemId, Money, NotificationId, OrderId, PartyId, Timestamp};

/// A lifecycle event worth telling a party about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// An order was placed against one of the designer's items.
    OrderPlaced {
        order_id: OrderId,
        item_id: ItemId,
        amount: Money,
    },
    /// Payment was captured into escrow.
    OrderPaid { order_id: OrderId, amount: Money },
    /// The garment was handed to a carrier.
    OrderShipped {
        order_id: OrderId,
        carrier: String,
        tracking_reference: String,
    },
    /// The customer confirmed receipt and escrow released.
    OrderDelivered { order_id: OrderId },
    /// The order was called off before fulfilment.
    OrderCancelled { order_id: OrderId, refunded: bool },
    /// A dispute was opened against the order.
    DisputeOpened {
        order_id: OrderId,
        dispute_id: DisputeId,
        reason: String,
    },
    /// An admin settled the dispute.
    DisputeResolved {
        order_id: OrderId,
        dispute_id: DisputeId,
        outcome: String,
    },
}

impl NotificationEvent {
    /// The wire tag of this event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderPlaced { .. } => "order_placed",
            Self::OrderPaid { .. } => "order_paid",
            Self::OrderShipped { .. } => "order_shipped",
            Self::OrderDelivered { .. } => "order_delivered",
            Self::OrderCancelled { .. } => "order_cancelled",
            Self::DisputeOpened { .. } => "dispute_opened",
            Self::DisputeResolved { .. } => "dispute_resolved",
        }
    }

    /// The order this event concerns.
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::OrderPlaced { order_id, .. }
            | Self::OrderPaid { order_id, .. }
            | Self::OrderShipped { order_id, .. }
            | Self::OrderDelivered { order_id }
            | Self::OrderCancelled { order_id, .. }
            | Self::DisputeOpened { order_id, .. }
            | Self::DisputeResolved { order_id, .. } => *order_id,
        }
    }
}

/// One event addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// The party being told.
    pub recipient: PartyId,
    /// What happened.
    pub event: NotificationEvent,
    /// When the notification was emitted.
    pub created_at: Timestamp,
}

impl Notification {
    /// Build a notification for a recipient, stamped now.
    pub fn new(recipient: PartyId, event: NotificationEvent) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            event,
            created_at: Timestamp::now(),
        }
    }
}
