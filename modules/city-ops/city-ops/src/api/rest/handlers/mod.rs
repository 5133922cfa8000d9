//! Request handlers, one submodule per resource.
//!
//! Handlers only translate between wire types and services: enum strings are
//! parsed in DTO conversions and every `DomainError` becomes a `Problem`.

use axum::Json;

use crate::api::rest::dto::MessageDto;

pub mod alerts;
pub mod assets;
pub mod auth;
pub mod incidents;
pub mod recommendations;
pub mod system;
pub mod tenants;
pub mod users;

/// Confirmation body returned by every delete.
fn deleted(entity: &str) -> Json<MessageDto> {
    Json(MessageDto::new(format!("{entity} deleted successfully")))
}
