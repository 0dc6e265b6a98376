//! Client secret value object.
//!
//! The configured OAuth2 client secret is hashed with Argon2 at start-up so
//! the plain value does not stay in memory longer than needed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use common::{AppError, AppResult};

/// Hashed client secret.
#[derive(Clone)]
pub struct ClientSecret {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecret")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl ClientSecret {
    /// Hash a plain text secret.
    ///
    /// # Errors
    /// Returns a validation error for an empty secret.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation("Client secret must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Client secret hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Verify a presented secret against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
