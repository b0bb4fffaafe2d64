//! Domain layer - Core credential entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record owned by the credential store, the password hashing policy
//! and the validated login/registration input.

pub mod constants;
pub mod credentials;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use credentials::Credentials;
pub use error::{DomainError, DomainResult};
pub use password::{HashingParams, HashingPolicy, Password};
pub use user::{UserId, UserRecord};
