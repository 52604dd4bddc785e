//! # Order Error Taxonomy
//!
//! Every failure an order command can produce, as a structured enum.
//! Callers match on variants to pick HTTP status codes and retry
//! behavior; the messages carry enough context to diagnose a rejected
//! command from the error alone.

use thiserror::Error;

use atelier_core::CoreError;

/// Errors produced by order lifecycle commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Malformed input rejected before any state was touched.
    #[error("validation failed: {reason}")]
    Validation {
        /// Human-readable description of the rejected input.
        reason: String,
    },

    /// The requested transition is not an edge of the lifecycle graph,
    /// or the order is not in the state the command requires.
    #[error("invalid transition for {order_id}: {from} -> {to} ({reason})")]
    InvalidTransition {
        /// The order the command addressed.
        order_id: String,
        /// State the order was actually in.
        from: String,
        /// State the command tried to reach.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },

    /// The acting party lacks the role or relationship the command requires.
    #[error("{actor} is not authorized to {operation} on {subject}: requires {required}")]
    Unauthorized {
        /// What the command addressed, usually an order id.
        subject: String,
        /// The acting party and role.
        actor: String,
        /// The refused operation.
        operation: String,
        /// Who would have been allowed.
        required: String,
    },

    /// The order already carries an open dispute.
    #[error("order {order_id} already has open dispute {dispute_id}")]
    DuplicateDispute {
        /// The order the command addressed.
        order_id: String,
        /// The dispute that is already open.
        dispute_id: String,
    },

    /// The dispute was already resolved by an earlier command.
    #[error("dispute {dispute_id} was already resolved ({outcome})")]
    AlreadyResolved {
        /// The dispute the command addressed.
        dispute_id: String,
        /// The outcome of the earlier resolution.
        outcome: String,
    },

    /// A concurrent writer committed first; the caller should re-read
    /// and retry against the fresh version.
    #[error("concurrent modification of {order_id}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        /// The order the command addressed.
        order_id: String,
        /// Version the writer read.
        expected: u64,
        /// Version actually stored.
        actual: u64,
    },

    /// No record exists under the given identifier.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind ("order", "item", "dispute").
        entity: &'static str,
        /// The identifier that missed.
        id: String,
    },

    /// The escrow record refused an operation in its current status.
    #[error("escrow {escrow_id} cannot {operation} while {status}")]
    InvalidEscrowOperation {
        /// The escrow record addressed.
        escrow_id: String,
        /// The refused operation.
        operation: String,
        /// Status the record was in.
        status: String,
    },
}

impl From<CoreError> for OrderError {
    fn from(err: CoreError) -> Self {
        Self::Validation {
            reason: err.to_string(),
        }
    }
}

impl OrderError {
    /// Shorthand for a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = OrderError::InvalidTransition {
            order_id: "order:abc".to_string(),
            from: "created".to_string(),
            to: "shipped".to_string(),
            reason: "payment not recorded".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("order:abc"));
        assert!(msg.contains("created -> shipped"));
    }

    #[test]
    fn core_errors_map_to_validation() {
        let err: OrderError = CoreError::InvalidAmount("abc".to_string()).into();
        assert!(matches!(err, OrderError::Validation { .. }));
    }
}
