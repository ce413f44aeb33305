//! Top-level command orchestration.
pub mod mirror;
