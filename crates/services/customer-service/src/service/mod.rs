//! Service layer - customer use cases and token handling.

mod auth_service;
mod client_secret;
mod customer_service;

pub use auth_service::{Authenticator, Claims, TokenResponse};
pub use client_secret::ClientSecret;
pub use customer_service::{CustomerManager, CustomerService};
