//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated definitions for `auth.AuthService`:
//! registration, login and token verification.

/// Authentication service definitions.
pub mod auth {
    tonic::include_proto!("auth");
}

// Re-export commonly used items
pub use auth::auth_service_server::{AuthService, AuthServiceServer};
