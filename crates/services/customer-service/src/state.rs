//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::{Authenticator, CustomerService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<dyn CustomerService>,
    pub authenticator: Arc<Authenticator>,
    /// `None` when running against the in-memory store
    pub database: Option<Database>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        customer_service: Arc<dyn CustomerService>,
        authenticator: Arc<Authenticator>,
        database: Option<Database>,
    ) -> Self {
        Self {
            customer_service,
            authenticator,
            database,
        }
    }
}
