//! # Dispute Records
//!
//! A dispute is the customer's formal objection to a shipped or
//! delivered order. While it is open the order sits frozen in
//! `Disputed`; an admin settles it with an outcome that directs the
//! escrowed funds. The record keeps the full story for the admin
//! review surface: who opened it, why, and how it ended.

use serde::{Deserialize, Serialize};

use atelier_core::{DisputeId, OrderId, PartyId, Timestamp};
use atelier_orders::{DisputeOutcome, OrderError};

/// Why the customer contested the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeReason {
    /// The parcel never arrived or arrived somewhere else.
    DeliveryIssue,
    /// A different garment than ordered.
    WrongItem,
    /// The garment arrived damaged.
    DamagedItem,
    /// Workmanship below what was listed.
    QualityIssue,
    /// The garment does not fit the ordered measurements.
    SizeIssue,
    /// The designer stopped responding.
    UnresponsiveDesigner,
    /// Anything the other reasons do not cover.
    Other,
}

impl DisputeReason {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeliveryIssue => "delivery_issue",
            Self::WrongItem => "wrong_item",
            Self::DamagedItem => "damaged_item",
            Self::QualityIssue => "quality_issue",
            Self::SizeIssue => "size_issue",
            Self::UnresponsiveDesigner => "unresponsive_designer",
            Self::Other => "other",
        }
    }

    /// Parse a reason from its canonical string name.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] for unknown names.
    pub fn parse(s: &str) -> Result<Self, OrderError> {
        match s {
            "delivery_issue" => Ok(Self::DeliveryIssue),
            "wrong_item" => Ok(Self::WrongItem),
            "damaged_item" => Ok(Self::DamagedItem),
            "quality_issue" => Ok(Self::QualityIssue),
            "size_issue" => Ok(Self::SizeIssue),
            "unresponsive_designer" => Ok(Self::UnresponsiveDesigner),
            "other" => Ok(Self::Other),
            other => Err(OrderError::Validation {
                reason: format!("unknown dispute reason '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for DisputeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a dispute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    /// Awaiting admin resolution.
    Open,
    /// Settled. Terminal.
    Resolved,
}

/// One contested order, from objection to settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    /// Unique identifier.
    pub id: DisputeId,
    /// The contested order.
    pub order_id: OrderId,
    /// The customer who opened it.
    pub opened_by: PartyId,
    /// Why it was opened.
    pub reason: DisputeReason,
    /// The customer's account of the problem.
    pub description: String,
    /// Open or resolved.
    pub status: DisputeStatus,
    /// How it was settled. `None` while open.
    pub outcome: Option<DisputeOutcome>,
    /// The admin who settled it. `None` while open.
    pub resolved_by: Option<PartyId>,
    /// The admin's resolution notes. `None` while open.
    pub resolution_notes: Option<String>,
    /// When it was opened.
    pub opened_at: Timestamp,
    /// When it was settled. `None` while open.
    pub resolved_at: Option<Timestamp>,
}

impl Dispute {
    /// Open a dispute against an order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Validation`] if the description is blank.
    pub fn open(
        order_id: OrderId,
        opened_by: PartyId,
        reason: DisputeReason,
        description: impl Into<String>,
    ) -> Result<Self, OrderError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(OrderError::Validation {
                reason: "dispute description must not be empty".to_string(),
            });
        }
        Ok(Self {
            id: DisputeId::new(),
            order_id,
            opened_by,
            reason,
            description,
            status: DisputeStatus::Open,
            outcome: None,
            resolved_by: None,
            resolution_notes: None,
            opened_at: Timestamp::now(),
            resolved_at: None,
        })
    }

    /// Settle the dispute with an outcome.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AlreadyResolved`] if it was settled before;
    /// a dispute resolves exactly once.
    pub fn resolve(
        &mut self,
        resolved_by: PartyId,
        outcome: DisputeOutcome,
        notes: Option<String>,
    ) -> Result<(), OrderError> {
        if self.status == DisputeStatus::Resolved {
            return Err(OrderError::AlreadyResolved {
                dispute_id: self.id.to_string(),
                outcome: self
                    .outcome
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }
        self.status = DisputeStatus::Resolved;
        self.outcome = Some(outcome);
        self.resolved_by = Some(resolved_by);
        self.resolution_notes = notes;
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }

    /// Whether the dispute is still awaiting resolution.
    pub fn is_open(&self) -> bool {
        self.status == DisputeStatus::Open
    }
}
