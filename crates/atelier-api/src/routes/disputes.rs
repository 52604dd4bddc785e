//! # Dispute Routes
//!
//! ## Endpoints
//!
//! - `POST /v1/orders/:id/dispute` — open a dispute (customer)
//! - `POST /v1/orders/:id/dispute/resolve` — settle it (admin)
//! - `GET /v1/disputes` — the admin review queue, newest first
//! - `GET /v1/disputes/:id` — one dispute record (admin)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use atelier_core::{DisputeId, OrderId};
use atelier_disputes::DisputeReason;
use atelier_orders::DisputeOutcome;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, AuthenticatedActor, Validate};
use crate::responses::DisputeBody;
use crate::state::AppState;

/// Request to open a dispute.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenDisputeRequest {
    /// Canonical reason name, e.g. "damaged_item".
    pub reason: String,
    /// The customer's account of the problem.
    pub description: String,
}

impl Validate for OpenDisputeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to settle a dispute.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveDisputeRequest {
    /// "release" (pay the designer) or "refund" (repay the customer).
    pub outcome: String,
    /// Resolution notes for the record.
    pub notes: Option<String>,
}

impl Validate for ResolveDisputeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.outcome.trim().is_empty() {
            return Err("outcome must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the disputes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/orders/:id/dispute", post(open_dispute))
        .route("/v1/orders/:id/dispute/resolve", post(resolve_dispute))
        .route("/v1/disputes", get(list_disputes))
        .route("/v1/disputes/:id", get(get_dispute))
}

/// POST /v1/orders/:id/dispute — Open a dispute against an order.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/dispute",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = OpenDisputeRequest,
    responses(
        (status = 201, description = "Dispute opened, order frozen", body = DisputeBody),
        (status = 403, description = "Caller is not the customer", body = crate::error::ErrorBody),
        (status = 409, description = "Not disputable, or a dispute is already open", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown reason or blank description", body = crate::error::ErrorBody),
    ),
    tag = "disputes"
)]
async fn open_dispute(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
    body: Result<Json<OpenDisputeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DisputeBody>), AppError> {
    let req = extract_validated_json(body)?;
    let reason = DisputeReason::parse(&req.reason)?;
    let dispute = state.engine.open_dispute(
        &actor,
        OrderId::from_uuid(id),
        reason,
        req.description,
    )?;
    Ok((StatusCode::CREATED, Json(dispute.into())))
}

/// POST /v1/orders/:id/dispute/resolve — Settle the open dispute.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/dispute/resolve",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = ResolveDisputeRequest,
    responses(
        (status = 200, description = "Dispute settled, escrow moved", body = DisputeBody),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "No dispute on this order", body = crate::error::ErrorBody),
        (status = 409, description = "Already resolved", body = crate::error::ErrorBody),
    ),
    tag = "disputes"
)]
async fn resolve_dispute(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
    body: Result<Json<ResolveDisputeRequest>, JsonRejection>,
) -> Result<Json<DisputeBody>, AppError> {
    let req = extract_validated_json(body)?;
    let outcome = DisputeOutcome::parse(&req.outcome)?;
    let dispute =
        state
            .engine
            .resolve_dispute(&actor, OrderId::from_uuid(id), outcome, req.notes)?;
    Ok(Json(dispute.into()))
}

/// GET /v1/disputes — The admin review queue.
#[utoipa::path(
    get,
    path = "/v1/disputes",
    responses(
        (status = 200, description = "All disputes, newest first", body = Vec<DisputeBody>),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
    ),
    tag = "disputes"
)]
async fn list_disputes(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<Json<Vec<DisputeBody>>, AppError> {
    let disputes = state.engine.list_disputes(&actor)?;
    Ok(Json(disputes.into_iter().map(Into::into).collect()))
}

/// GET /v1/disputes/:id — Fetch one dispute record.
#[utoipa::path(
    get,
    path = "/v1/disputes/{id}",
    params(("id" = Uuid, Path, description = "Dispute id")),
    responses(
        (status = 200, description = "The dispute", body = DisputeBody),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "No such dispute", body = crate::error::ErrorBody),
    ),
    tag = "disputes"
)]
async fn get_dispute(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
) -> Result<Json<DisputeBody>, AppError> {
    let dispute = state.engine.get_dispute(&actor, DisputeId::from_uuid(id))?;
    Ok(Json(dispute.into()))
}
