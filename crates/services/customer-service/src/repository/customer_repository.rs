//! Customer repository contract and its PostgreSQL implementation.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use super::entities::customer::{self, to_active_model, Entity as CustomerEntity, REPLACED_COLUMNS};
use common::{AppError, AppResult};
use domain::{Customer, CustomerId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Rows fetched per round trip while streaming `find_all`
pub const FIND_ALL_PAGE_SIZE: u64 = 100;

/// Customer repository trait for dependency injection.
///
/// Every operation is asynchronous. Lookups report absence as `None` or
/// `false`, never as an error. Deletes are idempotent.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer without an id (a new one is assigned), or replace
    /// the whole record sharing the customer's id. Returns the stored
    /// customer, id included.
    async fn save(&self, customer: Customer) -> AppResult<Customer>;

    /// Find customer by ID
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>>;

    /// Check whether a customer exists without loading it
    async fn exists_by_id(&self, id: CustomerId) -> AppResult<bool>;

    /// Stream every stored customer, in no particular order.
    ///
    /// Nothing is read until the stream is polled.
    fn find_all(&self) -> BoxStream<'static, AppResult<Customer>>;

    /// Delete a customer. A customer that was never saved is ignored.
    async fn delete(&self, customer: &Customer) -> AppResult<()>;

    /// Delete customer by ID
    async fn delete_by_id(&self, id: CustomerId) -> AppResult<()>;

    /// Remove every customer
    async fn delete_all(&self) -> AppResult<()>;
}

/// PostgreSQL implementation of CustomerRepository
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn save(&self, customer: Customer) -> AppResult<Customer> {
        let id = customer.id().unwrap_or_else(CustomerId::generate);
        let saved = customer.to_builder().with_id(id).build();

        CustomerEntity::insert(to_active_model(id, &saved)?)
            .on_conflict(
                OnConflict::column(customer::Column::Id)
                    .update_columns(REPLACED_COLUMNS)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(customer_id = %id, "Customer saved");
        Ok(saved)
    }

    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result
            .map(Customer::try_from)
            .transpose()
            .map_err(AppError::from)
    }

    async fn exists_by_id(&self, id: CustomerId) -> AppResult<bool> {
        let count = CustomerEntity::find_by_id(id.as_uuid())
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    fn find_all(&self) -> BoxStream<'static, AppResult<Customer>> {
        let db = self.db.clone();

        // State is the next page to fetch; None once a short page was seen.
        stream::unfold(Some(0u64), move |page| {
            let db = db.clone();
            async move {
                let page = page?;
                let fetched = CustomerEntity::find()
                    .order_by_asc(customer::Column::Id)
                    .paginate(&db, FIND_ALL_PAGE_SIZE)
                    .fetch_page(page)
                    .await;

                let (items, next) = match fetched {
                    Ok(models) => {
                        let next = (models.len() as u64 == FIND_ALL_PAGE_SIZE).then_some(page + 1);
                        let items: Vec<AppResult<Customer>> = models
                            .into_iter()
                            .map(|model| Customer::try_from(model).map_err(AppError::from))
                            .collect();
                        (items, next)
                    }
                    Err(e) => (vec![Err(AppError::from(e))], None),
                };

                Some((stream::iter(items), next))
            }
        })
        .flatten()
        .boxed()
    }

    async fn delete(&self, customer: &Customer) -> AppResult<()> {
        match customer.id() {
            Some(id) => self.delete_by_id(id).await,
            None => Ok(()),
        }
    }

    async fn delete_by_id(&self, id: CustomerId) -> AppResult<()> {
        let result = CustomerEntity::delete_by_id(id.as_uuid())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(customer_id = %id, rows = result.rows_affected, "Customer deleted");
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        let result = CustomerEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::info!(rows = result.rows_affected, "All customers deleted");
        Ok(())
    }
}
