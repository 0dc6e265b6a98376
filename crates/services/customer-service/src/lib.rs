//! Customer Service Library
//!
//! This crate provides customer management over HTTP, backed by PostgreSQL
//! or an in-memory store.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::CustomerServiceConfig;
use crate::infra::Database;
use crate::repository::{CustomerRepository, CustomerStore, InMemoryCustomerStore};
use crate::routes::create_router;
use crate::service::{Authenticator, CustomerManager};
use crate::state::AppState;

/// Run the service with configuration loaded from the environment.
pub async fn run_embedded(
    host: &str,
    port: u16,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = CustomerServiceConfig::from_env();
    run_server_with_config(host, port, in_memory, config).await
}

/// Build the application state from its parts.
pub fn build_state(
    repo: Arc<dyn CustomerRepository>,
    database: Option<Database>,
    config: &CustomerServiceConfig,
) -> common::AppResult<AppState> {
    let customer_service = Arc::new(CustomerManager::new(repo));
    let authenticator = Arc::new(Authenticator::new(&config.client, &config.jwt)?);

    Ok(AppState::new(customer_service, authenticator, database))
}

/// Router with request tracing applied.
pub fn app(state: AppState) -> Router {
    create_router(state).layer(TraceLayer::new_for_http())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    in_memory: bool,
    config: CustomerServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Pick the backing store
    let (repo, database): (Arc<dyn CustomerRepository>, Option<Database>) = if in_memory {
        info!("Using in-memory customer store");
        (Arc::new(InMemoryCustomerStore::new()), None)
    } else {
        let db = Database::connect(&config.database).await?;
        (Arc::new(CustomerStore::new(db.get_connection())), Some(db))
    };

    let state = build_state(repo, database, &config)?;
    let app = app(state);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Customer service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
