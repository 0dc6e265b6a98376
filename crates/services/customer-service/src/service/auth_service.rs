//! Authorization service - client-credentials token issuance.
//!
//! Issues HS256 access tokens to the configured OAuth2 client and verifies
//! the bearer tokens presented on customer routes.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppError, AppResult, ClientCredentialsConfig, JwtConfig};
use domain::{SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use super::client_secret::ClientSecret;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Client id the token was issued to
    pub sub: String,
    /// Space separated granted scopes
    pub scope: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Granted scopes, one by one
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

/// Token response returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    /// Space separated granted scopes
    #[schema(example = "customers")]
    pub scope: String,
}

/// Issues and verifies access tokens for a single configured client.
pub struct Authenticator {
    client_id: String,
    client_secret: ClientSecret,
    scopes: Vec<String>,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl Authenticator {
    /// Create new authenticator; hashes the configured client secret.
    pub fn new(client: &ClientCredentialsConfig, jwt: &JwtConfig) -> AppResult<Self> {
        Ok(Self {
            client_id: client.client_id.clone(),
            client_secret: ClientSecret::new(&client.client_secret)?,
            scopes: client.scopes.clone(),
            jwt_secret: jwt.secret.clone(),
            jwt_expiration_hours: jwt.expiration_hours,
        })
    }

    /// Exchange client credentials for an access token.
    ///
    /// Without `requested_scope` every configured scope is granted. A
    /// requested scope must be a space separated subset of the configured
    /// ones.
    pub fn issue_token(
        &self,
        client_id: &str,
        client_secret: &str,
        requested_scope: Option<&str>,
    ) -> AppResult<TokenResponse> {
        // Always run the hash check so timing does not reveal a valid id
        let secret_valid = self.client_secret.verify(client_secret);
        if client_id != self.client_id || !secret_valid {
            tracing::debug!(client_id, "Rejected client credentials");
            return Err(AppError::InvalidCredentials);
        }

        let scope = self.grant_scope(requested_scope)?;
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: client_id.to_string(),
            scope: scope.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        tracing::debug!(client_id, "Issued access token");
        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt_expiration_hours * SECONDS_PER_HOUR,
            scope,
        })
    }

    fn grant_scope(&self, requested: Option<&str>) -> AppResult<String> {
        let requested: Vec<&str> = requested
            .map(|raw| raw.split_whitespace().collect())
            .unwrap_or_default();

        if requested.is_empty() {
            return Ok(self.scopes.join(" "));
        }

        if let Some(unknown) = requested
            .iter()
            .find(|scope| !self.scopes.iter().any(|allowed| allowed.as_str() == **scope))
        {
            return Err(AppError::bad_request(format!("Invalid scope: {}", unknown)));
        }

        Ok(requested.join(" "))
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
