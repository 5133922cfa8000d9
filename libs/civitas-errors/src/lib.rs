//! Error documents returned by CivitasIQ HTTP services.
//!
//! - RFC 9457 Problem Details (`Problem`)
//! - A fixed catalog of problem kinds (`ErrDef`) shared by every module
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};
