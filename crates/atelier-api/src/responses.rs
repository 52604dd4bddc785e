//! # Response Bodies
//!
//! Wire representations of the domain records. Identifiers serialize
//! as bare UUIDs, enums as their snake_case names, timestamps as
//! ISO8601 `Z` strings, so the JSON surface stays stable even when the
//! domain types grow.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use atelier_core::Money;
use atelier_disputes::Dispute;
use atelier_engine::Item;
use atelier_notify::Notification;
use atelier_orders::{DeliveryProof, EscrowRecord, Order, Review, TransitionRecord};

/// A monetary amount on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MoneyBody {
    /// Decimal string, e.g. "120.00".
    pub amount: String,
    /// ISO 4217 code, e.g. "USD".
    pub currency: String,
}

impl From<Money> for MoneyBody {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount,
            currency: money.currency,
        }
    }
}

/// Escrow custody details embedded in an order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EscrowBody {
    pub id: Uuid,
    pub customer_wallet: String,
    pub designer_wallet: String,
    pub amount: MoneyBody,
    pub status: String,
    pub payment_reference: Option<String>,
    pub transaction_reference: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EscrowRecord> for EscrowBody {
    fn from(escrow: EscrowRecord) -> Self {
        Self {
            id: *escrow.id.as_uuid(),
            customer_wallet: escrow.customer_wallet.0,
            designer_wallet: escrow.designer_wallet.0,
            amount: escrow.amount.into(),
            status: escrow.status.to_string(),
            payment_reference: escrow.payment_reference,
            transaction_reference: escrow.transaction_reference,
            created_at: escrow.created_at.to_iso8601(),
            updated_at: escrow.updated_at.to_iso8601(),
        }
    }
}

/// One audit-trail hop.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitionBody {
    pub from: String,
    pub to: String,
    pub actor: Uuid,
    pub at: String,
}

impl From<TransitionRecord> for TransitionBody {
    fn from(t: TransitionRecord) -> Self {
        Self {
            from: t.from.to_string(),
            to: t.to.to_string(),
            actor: *t.actor.as_uuid(),
            at: t.at.to_iso8601(),
        }
    }
}

/// Delivery evidence attached after shipment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryProofBody {
    pub carrier: String,
    pub tracking_reference: String,
    pub photo_references: Vec<String>,
    pub notes: Option<String>,
}

impl From<DeliveryProof> for DeliveryProofBody {
    fn from(proof: DeliveryProof) -> Self {
        Self {
            carrier: proof.carrier,
            tracking_reference: proof.tracking_reference,
            photo_references: proof.photo_references,
            notes: proof.notes,
        }
    }
}

/// A customer review submitted at delivery confirmation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewBody {
    pub rating: u8,
    pub comment: Option<String>,
    pub submitted_at: String,
}

impl From<Review> for ReviewBody {
    fn from(review: Review) -> Self {
        Self {
            rating: review.rating,
            comment: review.comment,
            submitted_at: review.submitted_at.to_iso8601(),
        }
    }
}

/// A purchase order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderBody {
    pub id: Uuid,
    pub item_id: Uuid,
    pub customer: Uuid,
    pub designer: Uuid,
    pub amount: MoneyBody,
    pub state: String,
    pub version: u64,
    pub escrow: Option<EscrowBody>,
    pub open_dispute: Option<Uuid>,
    pub delivery_proof: Option<DeliveryProofBody>,
    pub review: Option<ReviewBody>,
    pub created_at: String,
    pub updated_at: String,
    pub transitions: Vec<TransitionBody>,
}

impl From<Order> for OrderBody {
    fn from(order: Order) -> Self {
        Self {
            id: *order.id.as_uuid(),
            item_id: *order.item_id.as_uuid(),
            customer: *order.customer.as_uuid(),
            designer: *order.designer.as_uuid(),
            amount: order.amount.into(),
            state: order.state.to_string(),
            version: order.version,
            escrow: order.escrow.map(Into::into),
            open_dispute: order.open_dispute.map(|d| *d.as_uuid()),
            delivery_proof: order.delivery_proof.map(Into::into),
            review: order.review.map(Into::into),
            created_at: order.created_at.to_iso8601(),
            updated_at: order.updated_at.to_iso8601(),
            transitions: order.transition_log.into_iter().map(Into::into).collect(),
        }
    }
}

/// A catalog listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemBody {
    pub id: Uuid,
    pub designer: Uuid,
    pub name: String,
    pub description: String,
    pub price: MoneyBody,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Item> for ItemBody {
    fn from(item: Item) -> Self {
        Self {
            id: *item.id.as_uuid(),
            designer: *item.designer.as_uuid(),
            name: item.name,
            description: item.description,
            price: item.price.into(),
            available: item.available,
            created_at: item.created_at.to_iso8601(),
            updated_at: item.updated_at.to_iso8601(),
        }
    }
}

/// A dispute record, as the admin review surface sees it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DisputeBody {
    pub id: Uuid,
    pub order_id: Uuid,
    pub opened_by: Uuid,
    pub reason: String,
    pub description: String,
    pub status: String,
    pub outcome: Option<String>,
    pub resolved_by: Option<Uuid>,
    pub resolution_notes: Option<String>,
    pub opened_at: String,
    pub resolved_at: Option<String>,
}

impl From<Dispute> for DisputeBody {
    fn from(dispute: Dispute) -> Self {
        Self {
            id: *dispute.id.as_uuid(),
            order_id: *dispute.order_id.as_uuid(),
            opened_by: *dispute.opened_by.as_uuid(),
            reason: dispute.reason.to_string(),
            description: dispute.description,
            status: match dispute.status {
                atelier_disputes::DisputeStatus::Open => "open".to_string(),
                atelier_disputes::DisputeStatus::Resolved => "resolved".to_string(),
            },
            outcome: dispute.outcome.map(|o| o.to_string()),
            resolved_by: dispute.resolved_by.map(|p| *p.as_uuid()),
            resolution_notes: dispute.resolution_notes,
            opened_at: dispute.opened_at.to_iso8601(),
            resolved_at: dispute.resolved_at.map(|t| t.to_iso8601()),
        }
    }
}

/// One delivered notification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationBody {
    pub id: Uuid,
    pub recipient: Uuid,
    /// The tagged event payload, dispatchable on its `type` field.
    #[schema(value_type = Object)]
    pub event: serde_json::Value,
    pub created_at: String,
}

impl From<Notification> for NotificationBody {
    fn from(notification: Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            recipient: *notification.recipient.as_uuid(),
            event: serde_json::to_value(&notification.event)
                .unwrap_or(serde_json::Value::Null),
            created_at: notification.created_at.to_iso8601(),
        }
    }
}
