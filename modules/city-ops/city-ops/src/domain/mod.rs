pub mod auth;
pub mod error;
pub mod repos;
pub mod service;
pub mod validation;
