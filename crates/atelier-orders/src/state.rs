//! # Order Lifecycle States
//!
//! The state graph for a purchase order:
//!
//! ```text
//! created ──> paid ──> shipped ──> delivered ──> released
//!    │          │         │            │
//!    │          │         └────────────┴──> disputed ──> released
//!    └──────────┴──> cancelled                      └──> refunded
//! ```
//!
//! Transitions are validated at runtime against [`OrderState::valid_transitions`];
//! every accepted hop is appended to the order's transition log.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Placed, awaiting payment.
    Created,
    /// Payment captured into escrow.
    Paid,
    /// Designer handed the garment to a carrier.
    Shipped,
    /// Customer confirmed receipt. Transient: release follows in the
    /// same command, but both hops appear in the log.
    Delivered,
    /// Escrow released to the designer. Terminal.
    Released,
    /// Escrow returned to the customer. Terminal.
    Refunded,
    /// A dispute is open; the order is frozen pending resolution.
    Disputed,
    /// Called off before fulfilment. Terminal.
    Cancelled,
}

impl OrderState {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Released => "released",
            Self::Refunded => "refunded",
            Self::Disputed => "disputed",
            Self::Cancelled => "cancelled",
        }
    }

    /// States reachable from this one in a single transition.
    pub fn valid_transitions(&self) -> &'static [OrderState] {
        match self {
            Self::Created => &[Self::Paid, Self::Cancelled],
            Self::Paid => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered, Self::Disputed],
            Self::Delivered => &[Self::Released, Self::Disputed],
            Self::Disputed => &[Self::Released, Self::Refunded],
            Self::Released | Self::Refunded | Self::Cancelled => &[],
        }
    }

    /// Whether a direct transition to `target` is an edge of the graph.
    pub fn can_transition_to(&self, target: OrderState) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderState; 8] = [
        OrderState::Created,
        OrderState::Paid,
        OrderState::Shipped,
        OrderState::Delivered,
        OrderState::Released,
        OrderState::Refunded,
        OrderState::Disputed,
        OrderState::Cancelled,
    ];

    #[test]
    fn terminal_states_have_no_exits() {
        for state in [
            OrderState::Released,
            OrderState::Refunded,
            OrderState::Cancelled,
        ] {
            assert!(state.is_terminal());
            assert!(state.valid_transitions().is_empty());
        }
    }

    #[test]
    fn non_terminal_states_have_exits() {
        for state in [
            OrderState::Created,
            OrderState::Paid,
            OrderState::Shipped,
            OrderState::Delivered,
            OrderState::Disputed,
        ] {
            assert!(!state.is_terminal());
        }
    }

    #[test]
    fn dispute_only_from_shipped_or_delivered() {
        for state in ALL {
            let allowed = matches!(state, OrderState::Shipped | OrderState::Delivered);
            assert_eq!(state.can_transition_to(OrderState::Disputed), allowed);
        }
    }

    #[test]
    fn cancel_only_before_fulfilment() {
        for state in ALL {
            let allowed = matches!(state, OrderState::Created | OrderState::Paid);
            assert_eq!(state.can_transition_to(OrderState::Cancelled), allowed);
        }
    }

    #[test]
    fn refund_only_through_dispute() {
        for state in ALL {
            let allowed = state == OrderState::Disputed;
            assert_eq!(state.can_transition_to(OrderState::Refunded), allowed);
        }
    }

    #[test]
    fn no_self_loops() {
        for state in ALL {
            assert!(!state.can_transition_to(state));
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&OrderState::Disputed).unwrap();
        assert_eq!(json, "\"disputed\"");
    }
}
