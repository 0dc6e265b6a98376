//! Domain-level constants.
//!
//! These constants define business rules and client-facing messages.

// =============================================================================
// Required fields
// =============================================================================

/// Message returned when a customer is built without a type
pub const CUSTOMER_TYPE_REQUIRED: &str = "Customer type can not be null.";

/// Message returned when an address is built without a country
pub const COUNTRY_REQUIRED: &str = "Country can not be null.";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// The only OAuth2 grant accepted by the token endpoint
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Scope granted to client-credentials tokens
pub const SCOPE_CUSTOMERS: &str = "customers";
