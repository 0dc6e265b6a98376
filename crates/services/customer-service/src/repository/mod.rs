//! Repository layer for data access.

pub mod entities;
mod customer_repository;
mod memory;

pub use customer_repository::{CustomerRepository, CustomerStore, FIND_ALL_PAGE_SIZE};
pub use memory::InMemoryCustomerStore;

// Export mock for tests
#[cfg(any(test, feature = "test-utils"))]
pub use customer_repository::MockCustomerRepository;
