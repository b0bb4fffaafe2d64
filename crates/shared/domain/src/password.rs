//! Password value object and hashing policy.
//!
//! Hashing uses Argon2id. The cost parameters are tunable through
//! [`HashingParams`]; the produced PHC string records algorithm, version,
//! cost and salt, so verification never needs the current policy.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub m_cost: u32,
    /// Number of iterations
    pub t_cost: u32,
    /// Degree of parallelism
    pub p_cost: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

/// Validated Argon2id configuration used to hash new passwords.
///
/// Construction fails on out-of-range parameters, so a policy that exists
/// can always hash.
#[derive(Debug, Clone)]
pub struct HashingPolicy {
    params: Params,
}

impl HashingPolicy {
    /// Build a policy, rejecting parameters Argon2 would refuse.
    pub fn new(params: HashingParams) -> DomainResult<Self> {
        let params = Params::new(params.m_cost, params.t_cost, params.p_cost, None)
            .map_err(|e| DomainError::hashing(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    /// Hash a plain text password into a storable PHC string.
    pub fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(format!("Password hash failed: {}", e)))?;
        Ok(Password {
            hash: hash.to_string(),
        })
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Hashed password value object.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Uses the parameters encoded in the hash itself and the library's
    /// constant-time comparison. A malformed hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_policy() -> HashingPolicy {
        HashingPolicy::new(HashingParams {
            m_cost: 8,
            t_cost: 1,
            p_cost: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = fast_policy().hash(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = fast_policy().hash(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let policy = fast_policy();
        let plain = "SamePassword123";
        let pass1 = policy.hash(plain).unwrap();
        let pass2 = policy.hash(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_hash_is_tagged_phc_string() {
        let password = fast_policy().hash("pw123").unwrap();

        assert!(password.as_str().starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
        assert!(!password.as_str().contains("pw123"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string");
        assert!(!password.verify("anything"));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = HashingPolicy::new(HashingParams {
            m_cost: 1,
            t_cost: 0,
            p_cost: 1,
        });

        assert!(matches!(result, Err(DomainError::Hashing(_))));
    }

    #[test]
    fn test_default_params_match_argon2_defaults() {
        let params = HashingParams::default();
        assert_eq!(params.m_cost, 19 * 1024);
        assert_eq!(params.t_cost, 2);
        assert_eq!(params.p_cost, 1);
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = fast_policy().hash("pw123").unwrap();
        assert!(!format!("{:?}", password).contains("argon2"));
    }
}
