//! Domain-level constants.
//!
//! These constants define token policy defaults and authentication rules.

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted token lifetime (about a century)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 100 * 365 * 24;

/// Minimum JWT secret length in bytes
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Plaintext hashed once at startup so unknown-email logins pay the same
/// verification cost as real ones.
pub const TIMING_DUMMY_PASSWORD: &str = "timing-equalization-dummy-password";
