//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The error taxonomy surfaced at the service boundary, with gRPC mapping
//! - Typed credential store failures
//! - Configuration sections and their validation

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, StoreError, StoreResult};
