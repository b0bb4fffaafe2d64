//! Unified error handling for the service boundary.
//!
//! Provides a single error type whose variants stay distinct all the way to
//! the transport, where each one is mapped to its own tonic status code.

use domain::DomainError;
use thiserror::Error;
use tonic::Status;

/// Application error types surfaced to callers.
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    InvalidArgument(String),

    // Registration
    #[error("Email is already registered")]
    DuplicateEmail,

    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    // Store
    #[error("Credential store unavailable")]
    StoreUnavailable(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::StoreUnavailable(detail) => {
                tracing::error!("Credential store error: {}", detail);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// gRPC status code for this error kind
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            AppError::InvalidArgument(_) => tonic::Code::InvalidArgument,
            AppError::DuplicateEmail => tonic::Code::AlreadyExists,
            AppError::InvalidCredentials | AppError::InvalidToken => tonic::Code::Unauthenticated,
            AppError::StoreUnavailable(_) => tonic::Code::Unavailable,
            AppError::Internal(_) => tonic::Code::Internal,
        }
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        Status::new(err.grpc_code(), err.user_message())
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::InvalidArgument(msg),
            DomainError::Hashing(msg) => AppError::Internal(msg),
        }
    }
}

// =============================================================================
// Token Errors
// =============================================================================

#[cfg(feature = "jwt")]
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("Token rejected: {:?}", err.kind());
        AppError::InvalidToken
    }
}

// =============================================================================
// Credential Store Errors
// =============================================================================

/// Failures reported by a credential store.
///
/// A duplicate email is kept apart from every other failure so callers can
/// tell a conflict from an outage.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(detail: impl Into<String>) -> Self {
        StoreError::Unavailable(detail.into())
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateEmail,
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::Unavailable(detail) => AppError::StoreUnavailable(detail),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for credential store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        AppError::StoreUnavailable(detail.into())
    }
}


#[cfg(all(test, feature = "database"))]
mod database_tests {
    use super::*;

    #[test]
    fn test_connection_failure_is_unavailable() {
        let err = StoreError::from(sea_orm::DbErr::Custom("conn reset".into()));
        assert!(matches!(err, StoreError::Unavailable(ref detail) if detail.contains("conn reset")));

        assert!(matches!(AppError::from(err), AppError::StoreUnavailable(_)));
    }

    #[test]
    fn test_record_not_found_is_not_duplicate() {
        let err = StoreError::from(sea_orm::DbErr::RecordNotInserted);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
