//! REST surface of the city-ops module.
//!
//! - `dto` - request/response wire types
//! - `error` - `DomainError` to `Problem` mapping
//! - `extract` - extractors that reject with a `Problem`
//! - `handlers/` - one submodule per resource
//! - `routes` - the `/api/v1` router

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod error_test;
