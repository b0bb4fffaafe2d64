//! Authentication service - registration, login and token checks.
//!
//! Password hashing and verification run on the blocking pool; the service
//! itself keeps no mutable state between requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::token::{Claims, IssuedToken, TokenIssuer};
use crate::store::CredentialStore;
use common::{AppError, AppResult, ConfigError, StoreError};
use domain::{Credentials, HashingPolicy, Password, UserId, TIMING_DUMMY_PASSWORD};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return its id
    async fn register(&self, email: String, password: String) -> AppResult<UserId>;

    /// Check credentials and return a signed session token
    async fn login(&self, email: String, password: String) -> AppResult<IssuedToken>;

    /// Mint a session token for a known user id
    fn issue_token(&self, user_id: UserId) -> AppResult<IssuedToken>;

    /// Verify a session token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService over a credential store.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hashing: HashingPolicy,
    tokens: TokenIssuer,
    // Verified against when the email is unknown, so both failure paths
    // cost one Argon2 verification.
    dummy_password: Password,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hashing: HashingPolicy,
        tokens: TokenIssuer,
    ) -> Result<Self, ConfigError> {
        let dummy_password = hashing
            .hash(TIMING_DUMMY_PASSWORD)
            .map_err(|e| ConfigError::Hashing(e.to_string()))?;

        Ok(Self {
            store,
            hashing,
            tokens,
            dummy_password,
        })
    }

    async fn hash_password(&self, password: String) -> AppResult<Password> {
        let policy = self.hashing.clone();
        tokio::task::spawn_blocking(move || policy.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(AppError::from)
    }

    async fn verify_password(stored: Password, password: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || stored.verify(&password))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    #[instrument(skip_all)]
    async fn register(&self, email: String, password: String) -> AppResult<UserId> {
        let credentials = Credentials::new(email, password).validated()?;

        let password_hash = self.hash_password(credentials.password).await?;

        let user = self
            .store
            .create_user(&credentials.email, password_hash.as_str())
            .await
            .map_err(|e| {
                if matches!(e, StoreError::DuplicateEmail) {
                    debug!("Registration rejected: email already registered");
                }
                AppError::from(e)
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    #[instrument(skip_all)]
    async fn login(&self, email: String, password: String) -> AppResult<IssuedToken> {
        let user = self.store.get_user_by_email(&email).await?;

        let stored = match &user {
            Some(user) => user.password(),
            None => self.dummy_password.clone(),
        };
        let password_valid = Self::verify_password(stored, password).await?;

        // Both rejections return the same error; only the log tells them apart.
        match user {
            Some(user) if password_valid => {
                info!(user_id = %user.id, "Login succeeded");
                self.tokens.issue(user.id)
            }
            Some(user) => {
                debug!(user_id = %user.id, reason = "password_mismatch", "Login rejected");
                Err(AppError::InvalidCredentials)
            }
            None => {
                debug!(reason = "unknown_email", "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user_id: UserId) -> AppResult<IssuedToken> {
        self.tokens.issue(user_id)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }
}
