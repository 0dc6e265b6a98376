//! Customer service - Handles customer-related use cases.
//!
//! Translates repository results into the outcomes the HTTP layer reports:
//! absence becomes `NotFound`, ids are owned by the store.

use async_trait::async_trait;
use futures::TryStreamExt;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{Customer, CustomerId};

use crate::repository::CustomerRepository;

/// Customer service trait for dependency injection.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Get customer by ID
    async fn get_customer(&self, id: CustomerId) -> AppResult<Customer>;

    /// List all customers
    async fn list_customers(&self) -> AppResult<Vec<Customer>>;

    /// Create a customer. Any id carried by the input is discarded.
    async fn create_customer(&self, customer: Customer) -> AppResult<Customer>;

    /// Replace an existing customer in full. The given id wins over the
    /// id carried by the input.
    async fn replace_customer(&self, id: CustomerId, customer: Customer) -> AppResult<Customer>;

    /// Delete customer (no error if it does not exist)
    async fn delete_customer(&self, id: CustomerId) -> AppResult<()>;
}

/// Concrete implementation of CustomerService using repository.
pub struct CustomerManager {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerManager {
    /// Create new customer service instance with repository
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CustomerService for CustomerManager {
    async fn get_customer(&self, id: CustomerId) -> AppResult<Customer> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.repo.find_all().try_collect().await
    }

    async fn create_customer(&self, customer: Customer) -> AppResult<Customer> {
        let created = self.repo.save(customer.to_builder().without_id().build()).await?;
        tracing::info!(customer_id = ?created.id(), customer_type = %created.customer_type(), "Customer created");
        Ok(created)
    }

    async fn replace_customer(&self, id: CustomerId, customer: Customer) -> AppResult<Customer> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound);
        }

        let replaced = self.repo.save(customer.to_builder().with_id(id).build()).await?;
        tracing::info!(customer_id = %id, "Customer replaced");
        Ok(replaced)
    }

    async fn delete_customer(&self, id: CustomerId) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}
