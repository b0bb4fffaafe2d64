//! Auth service configuration.

use std::env;
use std::str::FromStr;

use common::{ConfigError, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::{HashingParams, HashingPolicy};

/// Auth service configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Listen address
    pub service: ServiceConfig,
    /// Credential store connection
    pub database: DatabaseConfig,
    /// Token signing key and lifetime
    pub jwt: JwtConfig,
    /// Argon2 cost parameters for new hashes
    pub hashing: HashingParams,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are
    /// errors rather than silently ignored. Call [`validate`](Self::validate)
    /// before serving.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let first = |names: &[&str]| names.iter().find_map(|name| lookup(*name));

        let config = Self {
            service: ServiceConfig {
                host: lookup("AUTH_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: parse_or("AUTH_SERVICE_PORT", lookup("AUTH_SERVICE_PORT"), defaults.service.port)?,
            },
            database: DatabaseConfig {
                url: first(&["AUTH_SERVICE_DATABASE_URL", "DATABASE_URL"])
                    .unwrap_or(defaults.database.url),
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    defaults.database.max_connections,
                )?,
                min_connections: parse_or(
                    "DATABASE_MIN_CONNECTIONS",
                    lookup("DATABASE_MIN_CONNECTIONS"),
                    defaults.database.min_connections,
                )?,
            },
            jwt: JwtConfig {
                secret: first(&["JWT_SECRET", "AUTH_SERVICE_JWT_SECRET"]).unwrap_or_default(),
                expiration_hours: parse_or(
                    "JWT_EXPIRATION_HOURS",
                    first(&["JWT_EXPIRATION_HOURS", "AUTH_SERVICE_JWT_EXPIRATION_HOURS"]),
                    defaults.jwt.expiration_hours,
                )?,
            },
            hashing: HashingParams {
                m_cost: parse_or("ARGON2_M_COST", lookup("ARGON2_M_COST"), defaults.hashing.m_cost)?,
                t_cost: parse_or("ARGON2_T_COST", lookup("ARGON2_T_COST"), defaults.hashing.t_cost)?,
                p_cost: parse_or("ARGON2_P_COST", lookup("ARGON2_P_COST"), defaults.hashing.p_cost)?,
            },
        };

        Ok(config)
    }

    /// Check everything that would otherwise fail on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        self.hashing_policy()?;
        Ok(())
    }

    /// Build the hashing policy for these parameters.
    pub fn hashing_policy(&self) -> Result<HashingPolicy, ConfigError> {
        HashingPolicy::new(self.hashing).map_err(|e| ConfigError::Hashing(e.to_string()))
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<AuthServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = AuthServiceConfig::from_lookup(|name| vars.get(name).cloned())?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults_with_secret() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(config.service.port, 50051);
        assert_eq!(config.jwt.expiration_hours, 24);
        assert_eq!(config.hashing, HashingParams::default());
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_secret_not_needed_to_parse() {
        // Migration commands load config without a signing key.
        let config = AuthServiceConfig::from_lookup(|name| {
            (name == "DATABASE_URL").then(|| "postgres://db/auth".to_string())
        })
        .unwrap();

        assert_eq!(config.database.url, "postgres://db/auth");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_variable_names() {
        let config = load(&[
            ("AUTH_SERVICE_JWT_SECRET", SECRET),
            ("DATABASE_URL", "memory://"),
        ])
        .unwrap();

        assert_eq!(config.jwt.secret, SECRET);
        assert!(config.database.is_memory());
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let err = load(&[("JWT_SECRET", SECRET), ("AUTH_SERVICE_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "AUTH_SERVICE_PORT", .. }));
    }

    #[test]
    fn test_huge_expiration_is_fatal() {
        let err = load(&[("JWT_SECRET", SECRET), ("JWT_EXPIRATION_HOURS", "3000000000")]).unwrap_err();
        assert!(matches!(err, ConfigError::ExpirationTooLong { actual: 3_000_000_000, .. }));
    }

    #[test]
    fn test_invalid_hashing_cost_is_fatal() {
        let err = load(&[("JWT_SECRET", SECRET), ("ARGON2_T_COST", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Hashing(_)));
    }

    #[test]
    fn test_custom_hashing_cost() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("ARGON2_M_COST", "65536"),
            ("ARGON2_T_COST", "3"),
            ("ARGON2_P_COST", "4"),
        ])
        .unwrap();

        assert_eq!(
            config.hashing,
            HashingParams {
                m_cost: 65536,
                t_cost: 3,
                p_cost: 4
            }
        );
    }
}
