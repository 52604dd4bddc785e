//! # Catalog Routes
//!
//! ## Endpoints
//!
//! - `POST /v1/items` — list an item (designer)
//! - `GET /v1/items` — browse available items
//! - `GET /v1/items/:id` — fetch one item
//! - `DELETE /v1/items/:id` — delist (listing designer or admin)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use atelier_core::{ItemId, Money};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, AuthenticatedActor, Validate};
use crate::responses::ItemBody;
use crate::state::AppState;

/// Request to list a new item.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Display name.
    pub name: String,
    /// Listing description.
    #[serde(default)]
    pub description: String,
    /// Decimal price, e.g. "120.00".
    pub price: String,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Validate for CreateItemRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.price.trim().is_empty() {
            return Err("price must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/items", get(list_items).post(create_item))
        .route("/v1/items/:id", get(get_item).delete(delist_item))
}

/// POST /v1/items — List a new item.
#[utoipa::path(
    post,
    path = "/v1/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item listed", body = ItemBody),
        (status = 403, description = "Not a designer", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn create_item(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemBody>), AppError> {
    let req = extract_validated_json(body)?;
    let price = Money::new(req.price, req.currency)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let item = state
        .engine
        .create_item(&actor, req.name, req.description, price)?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /v1/items — Browse available items.
#[utoipa::path(
    get,
    path = "/v1/items",
    responses(
        (status = 200, description = "Available items", body = Vec<ItemBody>),
    ),
    tag = "catalog"
)]
async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemBody>> {
    Json(state.engine.list_items().into_iter().map(Into::into).collect())
}

/// GET /v1/items/:id — Fetch one item.
#[utoipa::path(
    get,
    path = "/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = ItemBody),
        (status = 404, description = "No such item", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemBody>, AppError> {
    let item = state.engine.get_item(ItemId::from_uuid(id))?;
    Ok(Json(item.into()))
}

/// DELETE /v1/items/:id — Delist an item.
#[utoipa::path(
    delete,
    path = "/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item delisted", body = ItemBody),
        (status = 403, description = "Not the listing designer", body = crate::error::ErrorBody),
        (status = 404, description = "No such item", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn delist_item(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemBody>, AppError> {
    let item = state.engine.delist_item(&actor, ItemId::from_uuid(id))?;
    Ok(Json(item.into()))
}
