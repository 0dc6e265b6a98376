//! In-memory customer repository.
//!
//! Keeps customers in a map behind a lock. Used by `serve --in-memory` and
//! by tests that need a real repository without PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::RwLock;

use common::AppResult;
use domain::{Customer, CustomerId};

use super::CustomerRepository;

/// Thread-safe in-memory store; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerStore {
    async fn save(&self, customer: Customer) -> AppResult<Customer> {
        let id = customer.id().unwrap_or_else(CustomerId::generate);
        let saved = customer.to_builder().with_id(id).build();

        self.customers.write().await.insert(id, saved.clone());

        tracing::debug!(customer_id = %id, "Customer saved");
        Ok(saved)
    }

    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: CustomerId) -> AppResult<bool> {
        Ok(self.customers.read().await.contains_key(&id))
    }

    fn find_all(&self) -> BoxStream<'static, AppResult<Customer>> {
        let customers = Arc::clone(&self.customers);

        // Snapshot taken on first poll
        stream::once(async move {
            customers
                .read()
                .await
                .values()
                .cloned()
                .collect::<Vec<_>>()
        })
        .flat_map(|snapshot| stream::iter(snapshot.into_iter().map(Ok)))
        .boxed()
    }

    async fn delete(&self, customer: &Customer) -> AppResult<()> {
        match customer.id() {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: CustomerId) -> AppResult<()> {
        let removed = self.customers.write().await.remove(&id).is_some();
        tracing::debug!(customer_id = %id, removed, "Customer deleted");
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.customers.write().await.clear();
        Ok(())
    }
}
