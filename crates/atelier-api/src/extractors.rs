//! # Custom Extractors & Validation
//!
//! The identity extractor resolves the `X-Actor-Id` / `X-Actor-Role`
//! headers into an [`Actor`]; the [`Validate`] trait and JSON helpers
//! cover request-body checks beyond what serde enforces.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::Json;
use uuid::Uuid;

use atelier_core::{Actor, PartyId, Role};

use crate::error::AppError;

/// The authenticated party on a request, resolved from the identity
/// headers. Downstream authorization trusts this identity.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedActor(pub Actor);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, "x-actor-id")?;
        let role = header(parts, "x-actor-role")?;

        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::Unauthorized("x-actor-id must be a UUID".to_string()))?;
        let role = Role::parse(role)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        Ok(Self(Actor::new(PartyId::from_uuid(id), role)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))
}

/// Trait for request types that carry business rules beyond what serde
/// deserialization checks.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to
/// [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
