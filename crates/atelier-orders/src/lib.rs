//! # atelier-orders
//!
//! The purchase lifecycle for the Atelier marketplace. An [`Order`]
//! aggregates the state machine, the embedded [`EscrowRecord`], the
//! delivery proof and review, and a full transition log, so that one
//! store commit captures everything a command changed.
//!
//! State graph: `created -> paid -> shipped -> delivered -> released`,
//! with `disputed` reachable from `shipped`/`delivered` and resolving
//! to `released` or `refunded`, and `cancelled` reachable from
//! `created`/`paid`.

pub mod error;
pub mod escrow;
pub mod order;
pub mod state;

pub use error::OrderError;
pub use escrow::{EscrowRecord, EscrowStatus};
pub use order::{
    DeliveryConfirmation, DeliveryProof, DisputeOutcome, Order, PaymentDetails, Review,
    TrackingInfo, TransitionRecord,
};
pub use state::OrderState;
