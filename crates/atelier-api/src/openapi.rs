//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier Marketplace API",
        version = "0.1.0",
        description = "Order, escrow, dispute, and notification lifecycle for a designer-fashion marketplace.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Catalog
        crate::routes::catalog::create_item,
        crate::routes::catalog::list_items,
        crate::routes::catalog::get_item,
        crate::routes::catalog::delist_item,
        // Orders
        crate::routes::orders::place_order,
        crate::routes::orders::list_orders,
        crate::routes::orders::get_order,
        crate::routes::orders::record_payment,
        crate::routes::orders::mark_shipped,
        crate::routes::orders::confirm_delivery,
        crate::routes::orders::cancel_order,
        // Disputes
        crate::routes::disputes::open_dispute,
        crate::routes::disputes::resolve_dispute,
        crate::routes::disputes::list_disputes,
        crate::routes::disputes::get_dispute,
        // Notifications
        crate::routes::notifications::list_notifications,
    ),
    components(schemas(
        // Response bodies
        crate::responses::MoneyBody,
        crate::responses::EscrowBody,
        crate::responses::TransitionBody,
        crate::responses::DeliveryProofBody,
        crate::responses::ReviewBody,
        crate::responses::OrderBody,
        crate::responses::ItemBody,
        crate::responses::DisputeBody,
        crate::responses::NotificationBody,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Request DTOs
        crate::routes::catalog::CreateItemRequest,
        crate::routes::orders::PlaceOrderRequest,
        crate::routes::orders::PaymentRequest,
        crate::routes::orders::ShipRequest,
        crate::routes::orders::DeliveryRequest,
        crate::routes::disputes::OpenDisputeRequest,
        crate::routes::disputes::ResolveDisputeRequest,
    )),
    tags(
        (name = "catalog", description = "Item listings"),
        (name = "orders", description = "Order lifecycle commands and projections"),
        (name = "disputes", description = "Dispute commands and the admin review surface"),
        (name = "notifications", description = "Per-party notification feeds"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router, serving the JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
