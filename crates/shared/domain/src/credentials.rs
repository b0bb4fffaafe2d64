//! Email/password pair submitted to register or log in.

use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// Credentials submitted by a caller.
///
/// Emails are compared exactly as given; no case folding is applied.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    // Upper bound keeps per-request hashing cost bounded.
    #[validate(length(min = 1, max = 1024, message = "Password length is out of range"))]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check field rules, returning the credentials unchanged when they pass.
    pub fn validated(self) -> DomainResult<Self> {
        self.validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(Credentials::new("a@x.com", "pw123").validated().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = Credentials::new("not-an-email", "pw123").validated();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = Credentials::new("a@x.com", "").validated();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_oversized_password_rejected() {
        let long = "x".repeat(1025);
        let result = Credentials::new("a@x.com", long).validated();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("a@x.com", "hunter22");
        assert!(!format!("{:?}", creds).contains("hunter22"));
    }
}
