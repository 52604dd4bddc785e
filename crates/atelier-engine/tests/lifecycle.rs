//! End-to-end lifecycle scenarios driven through the engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use atelier_core::{Actor, Money, PartyId, Role};
use atelier_disputes::{DisputeReason, DisputeStatus};
use atelier_engine::EscrowEngine;
use atelier_notify::{Notification, NotificationEmitter, NotificationLog, NotificationWorker};
use atelier_orders::{
    DeliveryConfirmation, DisputeOutcome, EscrowStatus, OrderError, OrderState, TrackingInfo,
};

struct Harness {
    engine: Arc<EscrowEngine>,
    rx: UnboundedReceiver<Notification>,
    customer: Actor,
    designer: Actor,
    admin: Actor,
}

fn harness() -> Harness {
    let (emitter, rx) = NotificationEmitter::channel();
    let log = Arc::new(NotificationLog::new());
    Harness {
        engine: Arc::new(EscrowEngine::new(emitter, log)),
        rx,
        customer: Actor::new(PartyId::new(), Role::Customer),
        designer: Actor::new(PartyId::new(), Role::Designer),
        admin: Actor::new(PartyId::new(), Role::Admin),
    }
}

fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

fn tracking() -> TrackingInfo {
    TrackingInfo {
        carrier: "DHL".to_string(),
        tracking_reference: "JD0123456789".to_string(),
    }
}

fn list_item(h: &Harness, price: &str) -> atelier_engine::Item {
    h.engine
        .create_item(
            &h.designer,
            "Silk wrap dress".to_string(),
            "Hand-dyed, made to measure".to_string(),
            Money::new(price, "USD").unwrap(),
        )
        .unwrap()
}

#[test]
fn happy_path_releases_escrow_with_one_delivered_notification() {
    let mut h = harness();
    let item = list_item(&h, "120.00");

    let order = h.engine.place_order(&h.customer, item.id).unwrap();
    assert_eq!(order.amount.to_string(), "120.00 USD");

    h.engine
        .record_payment(&h.customer, order.id, "pay-001".to_string())
        .unwrap();
    h.engine
        .mark_shipped(&h.designer, order.id, tracking())
        .unwrap();

    let confirmation = DeliveryConfirmation {
        rating: Some(5),
        review: Some("impeccable finish".to_string()),
        ..Default::default()
    };
    let order = h
        .engine
        .confirm_delivery(&h.customer, order.id, confirmation)
        .unwrap();

    assert_eq!(order.state, OrderState::Released);
    let escrow = order.escrow.as_ref().unwrap();
    assert_eq!(escrow.status, EscrowStatus::Released);
    assert_eq!(escrow.amount.minor_units(), 12000);
    assert!(escrow.transaction_reference.is_some());
    assert_eq!(order.review.as_ref().unwrap().rating, 5);

    let notifications = drain(&mut h.rx);
    let delivered: Vec<_> = notifications
        .iter()
        .filter(|n| n.event.kind() == "order_delivered")
        .collect();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].recipient, h.designer.id);

    let kinds: Vec<_> = notifications.iter().map(|n| n.event.kind()).collect();
    assert_eq!(
        kinds,
        vec!["order_placed", "order_paid", "order_shipped", "order_delivered"]
    );
}

#[test]
fn damaged_item_dispute_refunds_and_resolves_exactly_once() {
    let mut h = harness();
    let item = list_item(&h, "89.50");
    let order = h.engine.place_order(&h.customer, item.id).unwrap();
    h.engine
        .record_payment(&h.customer, order.id, "pay-002".to_string())
        .unwrap();
    h.engine
        .mark_shipped(&h.designer, order.id, tracking())
        .unwrap();

    let dispute = h
        .engine
        .open_dispute(
            &h.customer,
            order.id,
            DisputeReason::DamagedItem,
            "hem torn and beading missing".to_string(),
        )
        .unwrap();
    assert_eq!(dispute.status, DisputeStatus::Open);

    // A second dispute against the frozen order is refused.
    let err = h
        .engine
        .open_dispute(
            &h.customer,
            order.id,
            DisputeReason::Other,
            "still unhappy".to_string(),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::DuplicateDispute { .. }));

    let resolved = h
        .engine
        .resolve_dispute(
            &h.admin,
            order.id,
            DisputeOutcome::Refund,
            Some("photos conclusive".to_string()),
        )
        .unwrap();
    assert_eq!(resolved.status, DisputeStatus::Resolved);
    assert_eq!(resolved.outcome, Some(DisputeOutcome::Refund));

    let order = h.engine.get_order(&h.admin, order.id).unwrap();
    assert_eq!(order.state, OrderState::Refunded);
    assert_eq!(
        order.escrow.as_ref().unwrap().status,
        EscrowStatus::Refunded
    );
    assert_eq!(order.open_dispute, None);

    // Re-resolving fails without touching the first outcome.
    let err = h
        .engine
        .resolve_dispute(&h.admin, order.id, DisputeOutcome::Release, None)
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyResolved { .. }));

    let notifications = drain(&mut h.rx);
    let resolved_events: Vec<_> = notifications
        .iter()
        .filter(|n| n.event.kind() == "dispute_resolved")
        .collect();
    // Both parties hear about the resolution, once each.
    assert_eq!(resolved_events.len(), 2);
}

#[test]
fn concurrent_confirm_and_dispute_have_exactly_one_winner() {
    let h = harness();
    let item = list_item(&h, "200.00");
    let order = h.engine.place_order(&h.customer, item.id).unwrap();
    h.engine
        .record_payment(&h.customer, order.id, "pay-003".to_string())
        .unwrap();
    h.engine
        .mark_shipped(&h.designer, order.id, tracking())
        .unwrap();

    let engine = Arc::clone(&h.engine);
    let customer = h.customer;
    let order_id = order.id;
    let confirm = std::thread::spawn(move || {
        engine
            .confirm_delivery(&customer, order_id, DeliveryConfirmation::default())
            .is_ok()
    });
    let engine = Arc::clone(&h.engine);
    let dispute = std::thread::spawn(move || {
        engine
            .open_dispute(
                &customer,
                order_id,
                DisputeReason::DeliveryIssue,
                "box arrived empty".to_string(),
            )
            .is_ok()
    });

    let confirm_won = confirm.join().unwrap();
    let dispute_won = dispute.join().unwrap();
    assert!(confirm_won ^ dispute_won);

    let order = h.engine.get_order(&h.admin, order_id).unwrap();
    if confirm_won {
        assert_eq!(order.state, OrderState::Released);
        assert_eq!(
            order.escrow.as_ref().unwrap().status,
            EscrowStatus::Released
        );
    } else {
        assert_eq!(order.state, OrderState::Disputed);
        assert_eq!(order.escrow.as_ref().unwrap().status, EscrowStatus::Locked);
    }
}

#[test]
fn cancelling_a_paid_order_refunds_and_tells_both_parties() {
    let mut h = harness();
    let item = list_item(&h, "60.00");
    let order = h.engine.place_order(&h.customer, item.id).unwrap();
    h.engine
        .record_payment(&h.customer, order.id, "pay-004".to_string())
        .unwrap();

    let order = h.engine.cancel_order(&h.customer, order.id).unwrap();
    assert_eq!(order.state, OrderState::Cancelled);
    assert_eq!(
        order.escrow.as_ref().unwrap().status,
        EscrowStatus::Refunded
    );

    let cancelled: Vec<_> = drain(&mut h.rx)
        .into_iter()
        .filter(|n| n.event.kind() == "order_cancelled")
        .collect();
    assert_eq!(cancelled.len(), 2);
    let recipients: Vec<_> = cancelled.iter().map(|n| n.recipient).collect();
    assert!(recipients.contains(&h.customer.id));
    assert!(recipients.contains(&h.designer.id));
}

#[test]
fn delisted_item_blocks_new_orders() {
    let h = harness();
    let item = list_item(&h, "75.00");
    h.engine.delist_item(&h.designer, item.id).unwrap();

    let err = h.engine.place_order(&h.customer, item.id).unwrap_err();
    assert!(matches!(err, OrderError::Validation { .. }));
    assert!(h.engine.list_items().is_empty());
}

#[test]
fn only_the_listing_designer_or_admin_delists() {
    let h = harness();
    let item = list_item(&h, "75.00");
    let other_designer = Actor::new(PartyId::new(), Role::Designer);
    assert!(matches!(
        h.engine.delist_item(&other_designer, item.id),
        Err(OrderError::Unauthorized { .. })
    ));
    h.engine.delist_item(&h.admin, item.id).unwrap();
}

#[test]
fn order_visibility_is_scoped_to_involved_parties() {
    let h = harness();
    let item = list_item(&h, "75.00");
    let order = h.engine.place_order(&h.customer, item.id).unwrap();

    let stranger = Actor::new(PartyId::new(), Role::Customer);
    assert!(matches!(
        h.engine.get_order(&stranger, order.id),
        Err(OrderError::Unauthorized { .. })
    ));
    assert!(h.engine.list_orders(&stranger).is_empty());

    assert_eq!(h.engine.list_orders(&h.customer).len(), 1);
    assert_eq!(h.engine.list_orders(&h.designer).len(), 1);
    assert_eq!(h.engine.list_orders(&h.admin).len(), 1);

    assert!(matches!(
        h.engine.list_disputes(&h.customer),
        Err(OrderError::Unauthorized { .. })
    ));
}

#[test]
fn unknown_order_is_not_found() {
    let h = harness();
    let err = h
        .engine
        .record_payment(&h.customer, atelier_core::OrderId::new(), "pay-x".to_string())
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "order", .. }));
}

#[tokio::test]
async fn delivered_notifications_are_served_per_party() {
    let (emitter, rx) = NotificationEmitter::channel();
    let log = Arc::new(NotificationLog::new());
    tokio::spawn(NotificationWorker::new(Arc::clone(&log)).run(rx));
    let engine = EscrowEngine::new(emitter, Arc::clone(&log));

    let customer = Actor::new(PartyId::new(), Role::Customer);
    let designer = Actor::new(PartyId::new(), Role::Designer);
    let item = engine
        .create_item(
            &designer,
            "Linen shirt".to_string(),
            String::new(),
            Money::new("45.50", "EUR").unwrap(),
        )
        .unwrap();
    let order = engine.place_order(&customer, item.id).unwrap();
    engine
        .record_payment(&customer, order.id, "pay-005".to_string())
        .unwrap();

    tokio::time::timeout(Duration::from_secs(2), async {
        while log.len() < 2 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();

    let feed = engine.notifications_for(designer.id);
    let kinds: Vec<_> = feed.iter().map(|n| n.event.kind()).collect();
    assert_eq!(kinds, vec!["order_placed", "order_paid"]);
    assert!(engine.notifications_for(customer.id).is_empty());
}
