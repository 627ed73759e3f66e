//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use pet_hospital::auth::sessions::DEFAULT_SESSION_TTL_SECS;
use pet_hospital::db::DatabaseConfig;
use std::net::SocketAddr;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Security configuration
    pub security: SecurityConfig,
}

/// Security-related configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Password hashing pepper (required)
    pub password_pepper: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        // Bind address
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:3000"
                    .parse()
                    .expect("Default bind address is valid")
            });

        // Database configuration
        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| "postgres://postgres@localhost/pet_hospital".to_string());

        let database = DatabaseConfig {
            database_url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", 5),
            connection_timeout_secs: parse_env_or("DB_CONNECTION_TIMEOUT_SECS", 5),
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT_SECS", 300),
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME_SECS", 1800),
        };

        // Security configuration (REQUIRED)
        let password_pepper =
            std::env::var("PASSWORD_PEPPER").map_err(|_| ConfigError::MissingRequired {
                var: "PASSWORD_PEPPER".to_string(),
                hint: "Generate with: openssl rand -hex 16".to_string(),
            })?;

        if password_pepper.len() < 16 {
            return Err(ConfigError::Invalid {
                var: "PASSWORD_PEPPER".to_string(),
                reason: "Must be at least 16 characters (64-bit security)".to_string(),
            });
        }

        let security = SecurityConfig {
            password_pepper,
            session_ttl_secs: parse_env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
        };

        Ok(ServerConfig {
            bind,
            database,
            security,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.session_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_TTL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:3000".parse().unwrap(),
            database: DatabaseConfig {
                database_url: "test".to_string(),
                max_connections: 10,
                min_connections: 1,
                connection_timeout_secs: 5,
                idle_timeout_secs: 300,
                max_lifetime_secs: 1800,
            },
            security: SecurityConfig {
                password_pepper: "a".repeat(16),
                session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            },
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "PASSWORD_PEPPER".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PASSWORD_PEPPER"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_ttl_zero() {
        let mut config = test_config();
        config.security.session_ttl_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_no_connections() {
        let mut config = test_config();
        config.database.max_connections = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
