//! # The Escrow Engine
//!
//! The service layer every command goes through. It owns the stores
//! and the notification emitter, runs each order command inside the
//! store's write-lock critical section, and emits notifications only
//! after the transition has committed.
//!
//! Dispute resolution is serialized on the dispute record: the record
//! resolves exactly once, so of two racing admins exactly one wins and
//! the other gets `AlreadyResolved`. The winning resolution then moves
//! the order, which is guaranteed to still be `Disputed` because only
//! resolution leaves that state.

use std::sync::Arc;

use uuid::Uuid;

use atelier_core::{Actor, DisputeId, ItemId, Money, OrderId, PartyId, Role, WalletRef};
use atelier_disputes::{Dispute, DisputeReason};
use atelier_notify::{Notification, NotificationEmitter, NotificationEvent, NotificationLog};
use atelier_orders::{
    DeliveryConfirmation, DisputeOutcome, Order, OrderError, PaymentDetails, TrackingInfo,
};

use crate::catalog::Item;
use crate::store::{OrderStore, Store};

/// The marketplace service: stores, catalog, and command methods.
pub struct EscrowEngine {
    orders: OrderStore,
    items: Store<ItemId, Item>,
    disputes: Store<DisputeId, Dispute>,
    emitter: NotificationEmitter,
    delivered: Arc<NotificationLog>,
}

impl EscrowEngine {
    /// Build an engine around a notification channel and the log the
    /// worker delivers into.
    pub fn new(emitter: NotificationEmitter, delivered: Arc<NotificationLog>) -> Self {
        Self {
            orders: OrderStore::new(),
            items: Store::new("item"),
            disputes: Store::new("dispute"),
            emitter,
            delivered,
        }
    }

    // ---- catalog ----

    /// List a new item. Designers only.
    pub fn create_item(
        &self,
        actor: &Actor,
        name: String,
        description: String,
        price: Money,
    ) -> Result<Item, OrderError> {
        if actor.role != Role::Designer {
            return Err(unauthorized(actor, "list an item", "catalog", "a designer"));
        }
        let item = Item::new(actor.id, name, description, price)?;
        self.items.insert(item.id, item.clone());
        tracing::info!(item = %item.id, designer = %item.designer, "item listed");
        Ok(item)
    }

    /// Take an item off the catalog. The listing designer or an admin.
    pub fn delist_item(&self, actor: &Actor, item_id: ItemId) -> Result<Item, OrderError> {
        let actor = *actor;
        let item = self.items.try_update(item_id, move |item| {
            if item.designer != actor.id && !actor.is_admin() {
                return Err(unauthorized(
                    &actor,
                    "delist",
                    &item.id.to_string(),
                    "the listing designer",
                ));
            }
            item.delist();
            Ok(item.clone())
        })?;
        tracing::info!(item = %item.id, "item delisted");
        Ok(item)
    }

    /// Fetch one item.
    pub fn get_item(&self, item_id: ItemId) -> Result<Item, OrderError> {
        self.items.get(item_id)
    }

    /// Every item currently on the catalog.
    pub fn list_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .list()
            .into_iter()
            .filter(|i| i.available)
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        items
    }

    // ---- order commands ----

    /// Place an order against an available item. Customers only.
    pub fn place_order(&self, actor: &Actor, item_id: ItemId) -> Result<Order, OrderError> {
        if actor.role != Role::Customer {
            return Err(unauthorized(
                actor,
                "place an order",
                &item_id.to_string(),
                "a customer",
            ));
        }
        let item = self.items.get(item_id)?;
        if !item.available {
            return Err(OrderError::validation(format!(
                "item {} is no longer available",
                item.id
            )));
        }

        let order = Order::place(item.id, actor.id, item.designer, item.price.clone())?;
        self.orders.insert(order.clone());
        tracing::info!(order = %order.id, item = %item.id, customer = %actor.id, "order placed");

        self.emitter.emit(
            order.designer,
            NotificationEvent::OrderPlaced {
                order_id: order.id,
                item_id: item.id,
                amount: order.amount.clone(),
            },
        );
        Ok(order)
    }

    /// Capture payment into escrow. The customer, or an admin.
    pub fn record_payment(
        &self,
        actor: &Actor,
        order_id: OrderId,
        payment_reference: String,
    ) -> Result<Order, OrderError> {
        if payment_reference.trim().is_empty() {
            return Err(OrderError::validation(
                "payment reference must not be empty",
            ));
        }
        let actor = *actor;
        let order = self.orders.transition(order_id, move |order| {
            let details = PaymentDetails {
                payment_reference,
                customer_wallet: custodial_wallet(order.customer),
                designer_wallet: custodial_wallet(order.designer),
            };
            order.record_payment(&actor, details)
        })?;
        tracing::info!(order = %order.id, amount = %order.amount, "payment recorded");

        self.emitter.emit(
            order.designer,
            NotificationEvent::OrderPaid {
                order_id: order.id,
                amount: order.amount.clone(),
            },
        );
        Ok(order)
    }

    /// Record carrier hand-off. The designer only.
    pub fn mark_shipped(
        &self,
        actor: &Actor,
        order_id: OrderId,
        tracking: TrackingInfo,
    ) -> Result<Order, OrderError> {
        let actor = *actor;
        let event_tracking = tracking.clone();
        let order = self
            .orders
            .transition(order_id, move |order| order.mark_shipped(&actor, tracking))?;
        tracing::info!(order = %order.id, carrier = %event_tracking.carrier, "order shipped");

        self.emitter.emit(
            order.customer,
            NotificationEvent::OrderShipped {
                order_id: order.id,
                carrier: event_tracking.carrier,
                tracking_reference: event_tracking.tracking_reference,
            },
        );
        Ok(order)
    }

    /// Confirm receipt and release escrow to the designer. The
    /// customer only. An optional review commits with the confirmation.
    pub fn confirm_delivery(
        &self,
        actor: &Actor,
        order_id: OrderId,
        confirmation: DeliveryConfirmation,
    ) -> Result<Order, OrderError> {
        let actor = *actor;
        let reference = settlement_reference();
        let order = self.orders.transition(order_id, move |order| {
            order.confirm_delivery(&actor, confirmation, reference)
        })?;
        tracing::info!(order = %order.id, "delivery confirmed, escrow released");

        self.emitter.emit(
            order.designer,
            NotificationEvent::OrderDelivered { order_id: order.id },
        );
        Ok(order)
    }

    /// Call an order off before shipment. The customer, or an admin.
    /// Refunds the escrow if payment was already captured.
    pub fn cancel_order(&self, actor: &Actor, order_id: OrderId) -> Result<Order, OrderError> {
        let actor = *actor;
        let reference = settlement_reference();
        let order = self
            .orders
            .transition(order_id, move |order| order.cancel(&actor, reference))?;
        let refunded = order.escrow.is_some();
        tracing::info!(order = %order.id, refunded, "order cancelled");

        let event = NotificationEvent::OrderCancelled {
            order_id: order.id,
            refunded,
        };
        self.emitter
            .emit_all(&[order.customer, order.designer], &event);
        Ok(order)
    }

    // ---- disputes ----

    /// Open a dispute against a shipped or delivered order. The
    /// customer only; at most one open dispute per order.
    pub fn open_dispute(
        &self,
        actor: &Actor,
        order_id: OrderId,
        reason: DisputeReason,
        description: String,
    ) -> Result<Dispute, OrderError> {
        let dispute = Dispute::open(order_id, actor.id, reason, description)?;
        let dispute_id = dispute.id;
        let actor = *actor;
        // The order transition is the serialization point; the record
        // is only stored once the order accepted the dispute.
        let order = self
            .orders
            .transition(order_id, move |order| order.open_dispute(&actor, dispute_id))?;
        self.disputes.insert(dispute.id, dispute.clone());
        tracing::info!(order = %order.id, dispute = %dispute.id, reason = %dispute.reason, "dispute opened");

        self.emitter.emit(
            order.designer,
            NotificationEvent::DisputeOpened {
                order_id: order.id,
                dispute_id: dispute.id,
                reason: dispute.reason.to_string(),
            },
        );
        Ok(dispute)
    }

    /// Settle the open dispute on an order. Admins only. Resolves the
    /// dispute record exactly once, then moves the order and its escrow
    /// in the direction of the outcome.
    pub fn resolve_dispute(
        &self,
        actor: &Actor,
        order_id: OrderId,
        outcome: DisputeOutcome,
        notes: Option<String>,
    ) -> Result<Dispute, OrderError> {
        if !actor.is_admin() {
            return Err(unauthorized(
                actor,
                "resolve dispute",
                &order_id.to_string(),
                "an admin",
            ));
        }
        self.orders.get(order_id)?;
        let dispute_id = self.latest_dispute_for(order_id)?;

        let admin = actor.id;
        let dispute_notes = notes;
        let dispute = self.disputes.try_update(dispute_id, move |dispute| {
            dispute.resolve(admin, outcome, dispute_notes)?;
            Ok(dispute.clone())
        })?;

        let actor = *actor;
        let reference = settlement_reference();
        let order = self.orders.transition(order_id, move |order| {
            order.resolve_dispute(&actor, outcome, reference)
        })?;
        tracing::info!(order = %order.id, dispute = %dispute.id, outcome = %outcome, "dispute resolved");

        let event = NotificationEvent::DisputeResolved {
            order_id: order.id,
            dispute_id: dispute.id,
            outcome: outcome.to_string(),
        };
        self.emitter
            .emit_all(&[order.customer, order.designer], &event);
        Ok(dispute)
    }

    fn latest_dispute_for(&self, order_id: OrderId) -> Result<DisputeId, OrderError> {
        // Orders carry at most one dispute record in this system; the
        // newest one is the live resolution target.
        self.disputes
            .list()
            .into_iter()
            .filter(|d| d.order_id == order_id)
            .max_by_key(|d| d.opened_at)
            .map(|d| d.id)
            .ok_or(OrderError::NotFound {
                entity: "dispute",
                id: order_id.to_string(),
            })
    }

    // ---- read projections ----

    /// Fetch one order. The involved parties, or an admin.
    pub fn get_order(&self, actor: &Actor, order_id: OrderId) -> Result<Order, OrderError> {
        let order = self.orders.get(order_id)?;
        if !order.involves(actor.id) && !actor.is_admin() {
            return Err(unauthorized(
                actor,
                "view",
                &order_id.to_string(),
                "an involved party",
            ));
        }
        Ok(order)
    }

    /// Orders visible to the actor: all of them for admins, otherwise
    /// only the orders the actor is a party to.
    pub fn list_orders(&self, actor: &Actor) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .list()
            .into_iter()
            .filter(|o| actor.is_admin() || o.involves(actor.id))
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orders
    }

    /// Every dispute, newest first. Admins only.
    pub fn list_disputes(&self, actor: &Actor) -> Result<Vec<Dispute>, OrderError> {
        if !actor.is_admin() {
            return Err(unauthorized(actor, "list disputes", "disputes", "an admin"));
        }
        let mut disputes = self.disputes.list();
        disputes.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));
        Ok(disputes)
    }

    /// Fetch one dispute. Admins only.
    pub fn get_dispute(&self, actor: &Actor, dispute_id: DisputeId) -> Result<Dispute, OrderError> {
        if !actor.is_admin() {
            return Err(unauthorized(
                actor,
                "view dispute",
                &dispute_id.to_string(),
                "an admin",
            ));
        }
        self.disputes.get(dispute_id)
    }

    /// Delivered notifications for one party, oldest first.
    pub fn notifications_for(&self, party: PartyId) -> Vec<Notification> {
        self.delivered.for_recipient(party)
    }
}

/// Custodial wallet reference for a party, resolved by the payment
/// network.
fn custodial_wallet(party: PartyId) -> WalletRef {
    WalletRef(format!("custodial:{party}"))
}

/// Payment-network reference for a settlement leg.
fn settlement_reference() -> String {
    format!("txn:{}", Uuid::new_v4())
}

fn unauthorized(actor: &Actor, operation: &str, subject: &str, required: &str) -> OrderError {
    OrderError::Unauthorized {
        subject: subject.to_string(),
        actor: actor.to_string(),
        operation: operation.to_string(),
        required: required.to_string(),
    }
}
