//! # The Order Aggregate
//!
//! One `Order` owns everything that must change together under a single
//! store commit: the lifecycle state, the embedded escrow record, the
//! delivery proof and review, the open-dispute marker, the version
//! stamp, and the transition log. Commands validate authorization and
//! the lifecycle edge, then mutate all of it in one call, so a caller
//! holding the store's write lock gets an all-or-nothing update.

use serde::{Deserialize, Serialize};

use atelier_core::{Actor, DisputeId, ItemId, Money, OrderId, PartyId, Timestamp, WalletRef};

use crate::error::OrderError;
use crate::escrow::EscrowRecord;
use crate::state::OrderState;

/// Which party a dispute resolution settles funds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeOutcome {
    /// Escrow pays out to the designer.
    Release,
    /// Escrow returns to the customer.
    Refund,
}

impl DisputeOutcome {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Refund => "refund",
        }
    }

    /// Parse an outcome from its canonical string name.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] for unknown names.
    pub fn parse(s: &str) -> Result<Self, OrderError> {
        match s {
            "release" => Ok(Self::Release),
            "refund" => Ok(Self::Refund),
            other => Err(OrderError::validation(format!(
                "unknown dispute outcome '{other}', expected 'release' or 'refund'"
            ))),
        }
    }
}

impl std::fmt::Display for DisputeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment capture details supplied when recording payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Payment-network reference for the capture.
    pub payment_reference: String,
    /// Custodial wallet the funds come from.
    pub customer_wallet: WalletRef,
    /// Custodial wallet a release will pay into.
    pub designer_wallet: WalletRef,
}

/// Carrier hand-off details supplied when marking an order shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Carrier name (e.g., "DHL").
    pub carrier: String,
    /// Carrier tracking reference.
    pub tracking_reference: String,
}

/// Evidence that the garment reached the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryProof {
    /// Carrier name, from shipment.
    pub carrier: String,
    /// Carrier tracking reference, from shipment.
    pub tracking_reference: String,
    /// Photo references attached at delivery confirmation.
    pub photo_references: Vec<String>,
    /// Free-text notes attached at delivery confirmation.
    pub notes: Option<String>,
}

/// What the customer submits when confirming delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfirmation {
    /// Star rating, 1 to 5.
    pub rating: Option<u8>,
    /// Review text.
    pub review: Option<String>,
    /// Photo references of the received garment.
    pub photo_references: Vec<String>,
    /// Free-text delivery notes.
    pub notes: Option<String>,
}

/// A review left by the customer at delivery confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: Option<String>,
    /// When the review was submitted.
    pub submitted_at: Timestamp,
}

/// One accepted hop in an order's lifecycle, appended atomically with
/// the state change it records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the hop.
    pub from: OrderState,
    /// State after the hop.
    pub to: OrderState,
    /// Party whose command caused the hop.
    pub actor: PartyId,
    /// When the hop was accepted.
    pub at: Timestamp,
}

/// A purchase order for a single catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    pub id: OrderId,
    /// The catalog item being purchased.
    pub item_id: ItemId,
    /// The buying party.
    pub customer: PartyId,
    /// The selling party.
    pub designer: PartyId,
    /// Purchase price. Fixed at placement.
    pub amount: Money,
    /// Current lifecycle state.
    pub state: OrderState,
    /// Monotonic version stamp, bumped on every accepted command.
    pub version: u64,
    /// Funds custody record. `None` until payment is recorded.
    pub escrow: Option<EscrowRecord>,
    /// The currently open dispute, if any. At most one at a time.
    pub open_dispute: Option<DisputeId>,
    /// Delivery evidence. `None` until shipment.
    pub delivery_proof: Option<DeliveryProof>,
    /// Customer review. `None` unless submitted at delivery confirmation.
    pub review: Option<Review>,
    /// When the order was placed.
    pub created_at: Timestamp,
    /// When the order last changed.
    pub updated_at: Timestamp,
    /// Full lifecycle audit trail, in order of acceptance.
    pub transition_log: Vec<TransitionRecord>,
}

impl Order {
    /// Place a new order in the `Created` state.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] if the amount is not strictly
    /// positive or the customer and designer are the same party.
    pub fn place(
        item_id: ItemId,
        customer: PartyId,
        designer: PartyId,
        amount: Money,
    ) -> Result<Self, OrderError> {
        if !amount.is_positive() {
            return Err(OrderError::validation(format!(
                "order amount must be positive, got {amount}"
            )));
        }
        if customer == designer {
            return Err(OrderError::validation(
                "customer and designer must be different parties",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::new(),
            item_id,
            customer,
            designer,
            amount,
            state: OrderState::Created,
            version: 0,
            escrow: None,
            open_dispute: None,
            delivery_proof: None,
            review: None,
            created_at: now,
            updated_at: now,
            transition_log: Vec::new(),
        })
    }

    /// Record payment capture: `Created` -> `Paid`.
    ///
    /// Creates the escrow record and locks the full order amount in it,
    /// in the same command as the state change.
    ///
    /// Allowed for the order's customer, or an admin acting on their
    /// behalf.
    pub fn record_payment(
        &mut self,
        actor: &Actor,
        payment: PaymentDetails,
    ) -> Result<(), OrderError> {
        self.require_party(actor, self.customer, true, "record payment", "the customer")?;
        self.require_edge(OrderState::Paid, "payment is only accepted on a fresh order")?;

        let mut escrow = EscrowRecord::new(
            self.id,
            payment.customer_wallet,
            payment.designer_wallet,
            self.amount.clone(),
        );
        escrow.lock(payment.payment_reference)?;
        self.escrow = Some(escrow);
        self.record_transition(OrderState::Paid, actor);
        Ok(())
    }

    /// Record carrier hand-off: `Paid` -> `Shipped`.
    ///
    /// Allowed only for the order's designer.
    pub fn mark_shipped(&mut self, actor: &Actor, tracking: TrackingInfo) -> Result<(), OrderError> {
        self.require_party(actor, self.designer, false, "mark shipped", "the designer")?;
        if tracking.tracking_reference.trim().is_empty() {
            return Err(OrderError::validation("tracking reference must not be empty"));
        }
        self.require_edge(OrderState::Shipped, "only a paid order can ship")?;

        self.delivery_proof = Some(DeliveryProof {
            carrier: tracking.carrier,
            tracking_reference: tracking.tracking_reference,
            photo_references: Vec::new(),
            notes: None,
        });
        self.record_transition(OrderState::Shipped, actor);
        Ok(())
    }

    /// Confirm receipt: `Shipped` -> `Delivered` -> `Released`.
    ///
    /// Delivery confirmation and escrow release are one command; the
    /// transient `Delivered` hop still appears in the log so the audit
    /// trail shows receipt and settlement as distinct events. An
    /// optional review is recorded atomically with the confirmation.
    ///
    /// Allowed only for the order's customer.
    pub fn confirm_delivery(
        &mut self,
        actor: &Actor,
        confirmation: DeliveryConfirmation,
        transaction_reference: impl Into<String>,
    ) -> Result<(), OrderError> {
        self.require_party(actor, self.customer, false, "confirm delivery", "the customer")?;
        let review = validate_review(&confirmation)?;
        self.require_edge(OrderState::Delivered, "only a shipped order can be confirmed")?;

        self.escrow_mut("release")?.release(transaction_reference)?;
        if let Some(proof) = self.delivery_proof.as_mut() {
            proof.photo_references = confirmation.photo_references;
            proof.notes = confirmation.notes;
        }
        self.review = review;
        self.record_transition(OrderState::Delivered, actor);
        self.record_transition(OrderState::Released, actor);
        Ok(())
    }

    /// Freeze the order under a dispute: `Shipped`/`Delivered` -> `Disputed`.
    ///
    /// Allowed only for the order's customer. At most one dispute can be
    /// open against an order at a time.
    pub fn open_dispute(&mut self, actor: &Actor, dispute_id: DisputeId) -> Result<(), OrderError> {
        self.require_party(actor, self.customer, false, "open dispute", "the customer")?;
        if let Some(existing) = self.open_dispute {
            return Err(OrderError::DuplicateDispute {
                order_id: self.id.to_string(),
                dispute_id: existing.to_string(),
            });
        }
        self.require_edge(
            OrderState::Disputed,
            "disputes can only be opened after shipment and before settlement",
        )?;

        self.open_dispute = Some(dispute_id);
        self.record_transition(OrderState::Disputed, actor);
        Ok(())
    }

    /// Settle an open dispute: `Disputed` -> `Released` or `Refunded`.
    ///
    /// Moves the escrow in the direction of the outcome and clears the
    /// open-dispute marker. Allowed only for admins.
    pub fn resolve_dispute(
        &mut self,
        actor: &Actor,
        outcome: DisputeOutcome,
        transaction_reference: impl Into<String>,
    ) -> Result<(), OrderError> {
        if !actor.is_admin() {
            return Err(self.unauthorized(actor, "resolve dispute", "an admin"));
        }
        let target = match outcome {
            DisputeOutcome::Release => OrderState::Released,
            DisputeOutcome::Refund => OrderState::Refunded,
        };
        self.require_edge(target, "only a disputed order can be resolved")?;

        let escrow = self.escrow_mut(outcome.as_str())?;
        match outcome {
            DisputeOutcome::Release => escrow.release(transaction_reference)?,
            DisputeOutcome::Refund => escrow.refund(transaction_reference)?,
        }
        self.open_dispute = None;
        self.record_transition(target, actor);
        Ok(())
    }

    /// Call the order off: `Created`/`Paid` -> `Cancelled`.
    ///
    /// If payment was already captured, the escrow is refunded in the
    /// same command. Allowed for the order's customer, or an admin.
    pub fn cancel(
        &mut self,
        actor: &Actor,
        refund_reference: impl Into<String>,
    ) -> Result<(), OrderError> {
        self.require_party(actor, self.customer, true, "cancel", "the customer")?;
        self.require_edge(OrderState::Cancelled, "a shipped order can no longer be cancelled")?;

        if let Some(escrow) = self.escrow.as_mut() {
            escrow.refund(refund_reference)?;
        }
        self.record_transition(OrderState::Cancelled, actor);
        Ok(())
    }

    /// Whether the given party is the customer or designer on this order.
    pub fn involves(&self, party: PartyId) -> bool {
        self.customer == party || self.designer == party
    }

    fn require_party(
        &self,
        actor: &Actor,
        allowed: PartyId,
        admin_may_act: bool,
        operation: &str,
        required: &str,
    ) -> Result<(), OrderError> {
        if actor.id == allowed || (admin_may_act && actor.is_admin()) {
            return Ok(());
        }
        Err(self.unauthorized(actor, operation, required))
    }

    fn unauthorized(&self, actor: &Actor, operation: &str, required: &str) -> OrderError {
        OrderError::Unauthorized {
            subject: self.id.to_string(),
            actor: actor.to_string(),
            operation: operation.to_string(),
            required: required.to_string(),
        }
    }

    fn require_edge(&self, to: OrderState, reason: &str) -> Result<(), OrderError> {
        if !self.state.can_transition_to(to) {
            return Err(OrderError::InvalidTransition {
                order_id: self.id.to_string(),
                from: self.state.to_string(),
                to: to.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(())
    }

    fn escrow_mut(&mut self, operation: &str) -> Result<&mut EscrowRecord, OrderError> {
        let id = self.id.to_string();
        self.escrow
            .as_mut()
            .ok_or(OrderError::InvalidEscrowOperation {
                escrow_id: id,
                operation: operation.to_string(),
                status: "absent".to_string(),
            })
    }

    fn record_transition(&mut self, to: OrderState, actor: &Actor) {
        let now = Timestamp::now();
        self.transition_log.push(TransitionRecord {
            from: self.state,
            to,
            actor: actor.id,
            at: now,
        });
        self.state = to;
        self.version += 1;
        self.updated_at = now;
    }
}

fn validate_review(confirmation: &DeliveryConfirmation) -> Result<Option<Review>, OrderError> {
    match confirmation.rating {
        None => {
            if confirmation.review.is_some() {
                return Err(OrderError::validation(
                    "a review comment requires a rating",
                ));
            }
            Ok(None)
        }
        Some(rating) => {
            if !(1..=5).contains(&rating) {
                return Err(OrderError::validation(format!(
                    "rating must be between 1 and 5, got {rating}"
                )));
            }
            Ok(Some(Review {
                rating,
                comment: confirmation.review.clone(),
                submitted_at: Timestamp::now(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escrow::EscrowStatus;
    use atelier_core::Role;
    use proptest::prelude::*;

    fn parties() -> (Actor, Actor, Actor) {
        (
            Actor::new(PartyId::new(), Role::Customer),
            Actor::new(PartyId::new(), Role::Designer),
            Actor::new(PartyId::new(), Role::Admin),
        )
    }

    fn placed(customer: &Actor, designer: &Actor) -> Order {
        Order::place(
            ItemId::new(),
            customer.id,
            designer.id,
            Money::new("120.00", "USD").unwrap(),
        )
        .unwrap()
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            payment_reference: "pay-001".to_string(),
            customer_wallet: WalletRef("wallet-customer".to_string()),
            designer_wallet: WalletRef("wallet-designer".to_string()),
        }
    }

    fn tracking() -> TrackingInfo {
        TrackingInfo {
            carrier: "DHL".to_string(),
            tracking_reference: "JD0123456789".to_string(),
        }
    }

    #[test]
    fn placement_validates_amount_and_parties() {
        let (customer, designer, _) = parties();
        assert!(Order::place(
            ItemId::new(),
            customer.id,
            designer.id,
            Money::new("0.00", "USD").unwrap(),
        )
        .is_err());
        assert!(Order::place(
            ItemId::new(),
            customer.id,
            customer.id,
            Money::new("10.00", "USD").unwrap(),
        )
        .is_err());
    }

    #[test]
    fn happy_path_reaches_released() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);

        order.record_payment(&customer, payment()).unwrap();
        assert_eq!(order.state, OrderState::Paid);
        assert_eq!(
            order.escrow.as_ref().unwrap().status,
            EscrowStatus::Locked
        );

        order.mark_shipped(&designer, tracking()).unwrap();
        assert_eq!(order.state, OrderState::Shipped);

        let confirmation = DeliveryConfirmation {
            rating: Some(5),
            review: Some("beautiful tailoring".to_string()),
            ..Default::default()
        };
        order
            .confirm_delivery(&customer, confirmation, "txn-001")
            .unwrap();

        assert_eq!(order.state, OrderState::Released);
        assert_eq!(
            order.escrow.as_ref().unwrap().status,
            EscrowStatus::Released
        );
        assert_eq!(order.review.as_ref().unwrap().rating, 5);

        // Both the delivered and released hops are in the log.
        let hops: Vec<(OrderState, OrderState)> = order
            .transition_log
            .iter()
            .map(|t| (t.from, t.to))
            .collect();
        assert_eq!(
            hops,
            vec![
                (OrderState::Created, OrderState::Paid),
                (OrderState::Paid, OrderState::Shipped),
                (OrderState::Shipped, OrderState::Delivered),
                (OrderState::Delivered, OrderState::Released),
            ]
        );
        assert_eq!(order.version, 4);
    }

    #[test]
    fn payment_requires_customer_or_admin() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        let err = order.record_payment(&designer, payment()).unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized { .. }));

        order.record_payment(&admin, payment()).unwrap();
        assert_eq!(order.state, OrderState::Paid);
    }

    #[test]
    fn shipping_requires_designer() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();

        assert!(order.mark_shipped(&customer, tracking()).is_err());
        assert!(order.mark_shipped(&admin, tracking()).is_err());
        order.mark_shipped(&designer, tracking()).unwrap();
    }

    #[test]
    fn shipping_requires_payment() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        let err = order.mark_shipped(&designer, tracking()).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn empty_tracking_reference_rejected() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        let bad = TrackingInfo {
            carrier: "DHL".to_string(),
            tracking_reference: "  ".to_string(),
        };
        assert!(matches!(
            order.mark_shipped(&designer, bad),
            Err(OrderError::Validation { .. })
        ));
    }

    #[test]
    fn confirm_requires_customer() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();

        let err = order
            .confirm_delivery(&admin, DeliveryConfirmation::default(), "txn-001")
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized { .. }));
    }

    #[test]
    fn bad_rating_rejected_before_any_change() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();

        let confirmation = DeliveryConfirmation {
            rating: Some(6),
            ..Default::default()
        };
        assert!(order
            .confirm_delivery(&customer, confirmation, "txn-001")
            .is_err());
        assert_eq!(order.state, OrderState::Shipped);
        assert_eq!(order.escrow.as_ref().unwrap().status, EscrowStatus::Locked);
    }

    #[test]
    fn review_comment_without_rating_rejected() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();

        let confirmation = DeliveryConfirmation {
            review: Some("lovely".to_string()),
            ..Default::default()
        };
        assert!(order
            .confirm_delivery(&customer, confirmation, "txn-001")
            .is_err());
    }

    #[test]
    fn dispute_freezes_order_and_blocks_confirmation() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();

        let dispute_id = DisputeId::new();
        order.open_dispute(&customer, dispute_id).unwrap();
        assert_eq!(order.state, OrderState::Disputed);
        assert_eq!(order.open_dispute, Some(dispute_id));

        let err = order
            .confirm_delivery(&customer, DeliveryConfirmation::default(), "txn-001")
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn second_dispute_rejected() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();
        order.open_dispute(&customer, DisputeId::new()).unwrap();

        let err = order.open_dispute(&customer, DisputeId::new()).unwrap_err();
        assert!(matches!(err, OrderError::DuplicateDispute { .. }));
    }

    #[test]
    fn dispute_before_shipment_rejected() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        assert!(matches!(
            order.open_dispute(&customer, DisputeId::new()),
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn resolution_refunds_and_clears_marker() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();
        order.open_dispute(&customer, DisputeId::new()).unwrap();

        order
            .resolve_dispute(&admin, DisputeOutcome::Refund, "txn-002")
            .unwrap();
        assert_eq!(order.state, OrderState::Refunded);
        assert_eq!(order.open_dispute, None);
        assert_eq!(
            order.escrow.as_ref().unwrap().status,
            EscrowStatus::Refunded
        );
    }

    #[test]
    fn resolution_requires_admin() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();
        order.open_dispute(&customer, DisputeId::new()).unwrap();

        for actor in [&customer, &designer] {
            let err = order
                .resolve_dispute(actor, DisputeOutcome::Release, "txn-002")
                .unwrap_err();
            assert!(matches!(err, OrderError::Unauthorized { .. }));
        }
    }

    #[test]
    fn resolving_undisputed_order_rejected() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        assert!(order
            .resolve_dispute(&admin, DisputeOutcome::Release, "txn-002")
            .is_err());
    }

    #[test]
    fn cancel_before_payment_leaves_no_escrow() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.cancel(&customer, "txn-refund").unwrap();
        assert_eq!(order.state, OrderState::Cancelled);
        assert!(order.escrow.is_none());
    }

    #[test]
    fn cancel_after_payment_refunds_escrow() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.cancel(&customer, "txn-refund").unwrap();
        assert_eq!(order.state, OrderState::Cancelled);
        assert_eq!(
            order.escrow.as_ref().unwrap().status,
            EscrowStatus::Refunded
        );
    }

    #[test]
    fn cancel_after_shipment_rejected() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();
        assert!(matches!(
            order.cancel(&customer, "txn-refund"),
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn designer_cannot_cancel() {
        let (customer, designer, _) = parties();
        let mut order = placed(&customer, &designer);
        assert!(matches!(
            order.cancel(&designer, "txn-refund"),
            Err(OrderError::Unauthorized { .. })
        ));
    }

    #[test]
    fn terminal_states_reject_every_command() {
        let (customer, designer, admin) = parties();
        let mut order = placed(&customer, &designer);
        order.record_payment(&customer, payment()).unwrap();
        order.mark_shipped(&designer, tracking()).unwrap();
        order
            .confirm_delivery(&customer, DeliveryConfirmation::default(), "txn-001")
            .unwrap();

        assert!(order.record_payment(&customer, payment()).is_err());
        assert!(order.mark_shipped(&designer, tracking()).is_err());
        assert!(order
            .confirm_delivery(&customer, DeliveryConfirmation::default(), "txn-009")
            .is_err());
        assert!(order.open_dispute(&customer, DisputeId::new()).is_err());
        assert!(order
            .resolve_dispute(&admin, DisputeOutcome::Refund, "txn-009")
            .is_err());
        assert!(order.cancel(&customer, "txn-009").is_err());
    }

    /// Random command sequences can only produce paths made of valid
    /// lifecycle edges, and the version stamp always equals the number
    /// of logged hops.
    #[derive(Debug, Clone, Copy)]
    enum Command {
        Pay,
        Ship,
        Confirm,
        Dispute,
        ResolveRelease,
        ResolveRefund,
        Cancel,
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Pay),
            Just(Command::Ship),
            Just(Command::Confirm),
            Just(Command::Dispute),
            Just(Command::ResolveRelease),
            Just(Command::ResolveRefund),
            Just(Command::Cancel),
        ]
    }

    proptest! {
        #[test]
        fn arbitrary_command_sequences_never_break_the_graph(
            commands in proptest::collection::vec(command_strategy(), 0..24)
        ) {
            let (customer, designer, admin) = parties();
            let mut order = placed(&customer, &designer);

            for command in commands {
                // Failed commands must leave the order untouched.
                let before = order.clone();
                let result = match command {
                    Command::Pay => order.record_payment(&customer, payment()),
                    Command::Ship => order.mark_shipped(&designer, tracking()),
                    Command::Confirm => order.confirm_delivery(
                        &customer,
                        DeliveryConfirmation::default(),
                        "txn-p",
                    ),
                    Command::Dispute => order.open_dispute(&customer, DisputeId::new()),
                    Command::ResolveRelease => {
                        order.resolve_dispute(&admin, DisputeOutcome::Release, "txn-p")
                    }
                    Command::ResolveRefund => {
                        order.resolve_dispute(&admin, DisputeOutcome::Refund, "txn-p")
                    }
                    Command::Cancel => order.cancel(&customer, "txn-p"),
                };
                if result.is_err() {
                    prop_assert_eq!(&order, &before);
                }
            }

            for hop in &order.transition_log {
                prop_assert!(hop.from.can_transition_to(hop.to));
            }
            prop_assert_eq!(order.version as usize, order.transition_log.len());
        }
    }
}
