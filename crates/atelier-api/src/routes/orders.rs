//! # Order Routes
//!
//! ## Endpoints
//!
//! - `POST /v1/orders` — place an order (customer)
//! - `GET /v1/orders` — orders visible to the caller
//! - `GET /v1/orders/:id` — one order (involved party or admin)
//! - `POST /v1/orders/:id/payment` — capture payment into escrow
//! - `POST /v1/orders/:id/ship` — record carrier hand-off (designer)
//! - `POST /v1/orders/:id/delivery` — confirm receipt, release escrow
//! - `POST /v1/orders/:id/cancel` — call the order off

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use atelier_core::{ItemId, OrderId};
use atelier_orders::{DeliveryConfirmation, TrackingInfo};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, AuthenticatedActor, Validate};
use crate::responses::OrderBody;
use crate::state::AppState;

/// Request to place an order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// The item to purchase.
    pub item_id: Uuid,
}

/// Request to record payment capture.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Payment-network reference for the capture.
    pub payment_reference: String,
}

impl Validate for PaymentRequest {
    fn validate(&self) -> Result<(), String> {
        if self.payment_reference.trim().is_empty() {
            return Err("payment_reference must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to record carrier hand-off.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ShipRequest {
    /// Carrier name.
    pub carrier: String,
    /// Carrier tracking reference.
    pub tracking_reference: String,
}

impl Validate for ShipRequest {
    fn validate(&self) -> Result<(), String> {
        if self.carrier.trim().is_empty() {
            return Err("carrier must not be empty".to_string());
        }
        if self.tracking_reference.trim().is_empty() {
            return Err("tracking_reference must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to confirm delivery, with an optional review.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeliveryRequest {
    /// Star rating, 1 to 5.
    pub rating: Option<u8>,
    /// Review text; requires a rating.
    pub review: Option<String>,
    /// Photo references of the received garment.
    #[serde(default)]
    pub photo_references: Vec<String>,
    /// Free-text delivery notes.
    pub notes: Option<String>,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders).post(place_order))
        .route("/v1/orders/:id", get(get_order))
        .route("/v1/orders/:id/payment", post(record_payment))
        .route("/v1/orders/:id/ship", post(mark_shipped))
        .route("/v1/orders/:id/delivery", post(confirm_delivery))
        .route("/v1/orders/:id/cancel", post(cancel_order))
}

/// POST /v1/orders — Place an order against an available item.
#[utoipa::path(
    post,
    path = "/v1/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderBody),
        (status = 404, description = "No such item", body = crate::error::ErrorBody),
        (status = 422, description = "Item unavailable", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn place_order(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderBody>), AppError> {
    let req = extract_json(body)?;
    let order = state
        .engine
        .place_order(&actor, ItemId::from_uuid(req.item_id))?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /v1/orders — Orders visible to the caller.
#[utoipa::path(
    get,
    path = "/v1/orders",
    responses(
        (status = 200, description = "Orders involving the caller (all of them for admins)", body = Vec<OrderBody>),
    ),
    tag = "orders"
)]
async fn list_orders(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Json<Vec<OrderBody>> {
    Json(
        state
            .engine
            .list_orders(&actor)
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}

/// GET /v1/orders/:id — Fetch one order.
#[utoipa::path(
    get,
    path = "/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = OrderBody),
        (status = 403, description = "Caller is not involved", body = crate::error::ErrorBody),
        (status = 404, description = "No such order", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn get_order(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderBody>, AppError> {
    let order = state.engine.get_order(&actor, OrderId::from_uuid(id))?;
    Ok(Json(order.into()))
}

/// POST /v1/orders/:id/payment — Capture payment into escrow.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/payment",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment captured, escrow locked", body = OrderBody),
        (status = 403, description = "Caller may not pay for this order", body = crate::error::ErrorBody),
        (status = 409, description = "Order is not awaiting payment", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn record_payment(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<OrderBody>, AppError> {
    let req = extract_validated_json(body)?;
    let order = state
        .engine
        .record_payment(&actor, OrderId::from_uuid(id), req.payment_reference)?;
    Ok(Json(order.into()))
}

/// POST /v1/orders/:id/ship — Record carrier hand-off.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/ship",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = ShipRequest,
    responses(
        (status = 200, description = "Order shipped", body = OrderBody),
        (status = 403, description = "Caller is not the designer", body = crate::error::ErrorBody),
        (status = 409, description = "Order is not paid", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn mark_shipped(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
    body: Result<Json<ShipRequest>, JsonRejection>,
) -> Result<Json<OrderBody>, AppError> {
    let req = extract_validated_json(body)?;
    let tracking = TrackingInfo {
        carrier: req.carrier,
        tracking_reference: req.tracking_reference,
    };
    let order = state
        .engine
        .mark_shipped(&actor, OrderId::from_uuid(id), tracking)?;
    Ok(Json(order.into()))
}

/// POST /v1/orders/:id/delivery — Confirm receipt and release escrow.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/delivery",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = DeliveryRequest,
    responses(
        (status = 200, description = "Delivery confirmed, escrow released", body = OrderBody),
        (status = 403, description = "Caller is not the customer", body = crate::error::ErrorBody),
        (status = 409, description = "Order is not shipped", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid review", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn confirm_delivery(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
    body: Result<Json<DeliveryRequest>, JsonRejection>,
) -> Result<Json<OrderBody>, AppError> {
    let req = extract_json(body)?;
    let confirmation = DeliveryConfirmation {
        rating: req.rating,
        review: req.review,
        photo_references: req.photo_references,
        notes: req.notes,
    };
    let order = state
        .engine
        .confirm_delivery(&actor, OrderId::from_uuid(id), confirmation)?;
    Ok(Json(order.into()))
}

/// POST /v1/orders/:id/cancel — Call the order off before shipment.
#[utoipa::path(
    post,
    path = "/v1/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled, escrow refunded if paid", body = OrderBody),
        (status = 403, description = "Caller may not cancel this order", body = crate::error::ErrorBody),
        (status = 409, description = "Order already shipped", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
async fn cancel_order(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderBody>, AppError> {
    let order = state.engine.cancel_order(&actor, OrderId::from_uuid(id))?;
    Ok(Json(order.into()))
}
