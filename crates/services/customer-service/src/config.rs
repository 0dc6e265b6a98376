//! Customer service configuration.

use std::env;

use common::{ClientCredentialsConfig, DatabaseConfig, JwtConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Customer service configuration.
#[derive(Debug, Clone, Default)]
pub struct CustomerServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Access token signing settings
    pub jwt: JwtConfig,
    /// OAuth2 client allowed to request tokens
    pub client: ClientCredentialsConfig,
}

impl CustomerServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `JWT_SECRET` is missing or shorter than the minimum length.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        let jwt_secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("CUSTOMER_SERVICE_JWT_SECRET"))
            .expect("JWT_SECRET must be set (minimum 32 characters)");
        assert!(
            jwt_secret.len() >= MIN_JWT_SECRET_LENGTH,
            "JWT_SECRET must be at least {} characters",
            MIN_JWT_SECRET_LENGTH
        );

        let client_defaults = ClientCredentialsConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("CUSTOMER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
            client: ClientCredentialsConfig {
                client_id: env::var("OAUTH_CLIENT_ID").unwrap_or(client_defaults.client_id),
                client_secret: env::var("OAUTH_CLIENT_SECRET")
                    .unwrap_or(client_defaults.client_secret),
                scopes: env::var("OAUTH_CLIENT_SCOPES")
                    .ok()
                    .map(|raw| ClientCredentialsConfig::parse_scopes(&raw))
                    .filter(|scopes| !scopes.is_empty())
                    .unwrap_or(client_defaults.scopes),
            },
        }
    }
}
