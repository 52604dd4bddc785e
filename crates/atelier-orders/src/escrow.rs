//! # Escrow Records
//!
//! Funds custody for a paid order. The record is created and locked in
//! the same payment command, then moves exactly once to `Released` or
//! `Refunded`. The full locked amount moves on settlement; there are no
//! partial payouts.

use serde::{Deserialize, Serialize};

use atelier_core::{EscrowId, Money, OrderId, Timestamp, WalletRef};

use crate::error::OrderError;

/// Custody status of escrowed funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    /// Record created, funds not yet captured.
    Pending,
    /// Funds captured and held.
    Locked,
    /// Funds paid out to the designer. Terminal.
    Released,
    /// Funds returned to the customer. Terminal.
    Refunded,
}

impl EscrowStatus {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Locked => "locked",
            Self::Released => "released",
            Self::Refunded => "refunded",
        }
    }

    /// Whether funds have settled and no further movement is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Refunded)
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funds held in custody for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Unique identifier of this record.
    pub id: EscrowId,
    /// The order whose funds are held.
    pub order_id: OrderId,
    /// Custodial wallet the funds were captured from.
    pub customer_wallet: WalletRef,
    /// Custodial wallet a release pays into.
    pub designer_wallet: WalletRef,
    /// The full amount held. Settlement always moves all of it.
    pub amount: Money,
    /// Current custody status.
    pub status: EscrowStatus,
    /// Payment-network reference recorded at capture.
    pub payment_reference: Option<String>,
    /// Payment-network reference recorded at settlement.
    pub transaction_reference: Option<String>,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record last changed status.
    pub updated_at: Timestamp,
}

impl EscrowRecord {
    /// Create a pending record for an order's funds.
    pub fn new(
        order_id: OrderId,
        customer_wallet: WalletRef,
        designer_wallet: WalletRef,
        amount: Money,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: EscrowId::new(),
            order_id,
            customer_wallet,
            designer_wallet,
            amount,
            status: EscrowStatus::Pending,
            payment_reference: None,
            transaction_reference: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capture funds: `Pending` -> `Locked`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidEscrowOperation`] unless the record
    /// is pending.
    pub fn lock(&mut self, payment_reference: impl Into<String>) -> Result<(), OrderError> {
        self.require_status(EscrowStatus::Pending, "lock")?;
        self.status = EscrowStatus::Locked;
        self.payment_reference = Some(payment_reference.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Pay the full amount out to the designer: `Locked` -> `Released`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidEscrowOperation`] unless the record
    /// is locked. A record settles at most once.
    pub fn release(&mut self, transaction_reference: impl Into<String>) -> Result<(), OrderError> {
        self.require_status(EscrowStatus::Locked, "release")?;
        self.status = EscrowStatus::Released;
        self.transaction_reference = Some(transaction_reference.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Return the full amount to the customer: `Locked` -> `Refunded`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidEscrowOperation`] unless the record
    /// is locked. A record settles at most once.
    pub fn refund(&mut self, transaction_reference: impl Into<String>) -> Result<(), OrderError> {
        self.require_status(EscrowStatus::Locked, "refund")?;
        self.status = EscrowStatus::Refunded;
        self.transaction_reference = Some(transaction_reference.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn require_status(&self, expected: EscrowStatus, operation: &str) -> Result<(), OrderError> {
        if self.status != expected {
            return Err(OrderError::InvalidEscrowOperation {
                escrow_id: self.id.to_string(),
                operation: operation.to_string(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }
}
