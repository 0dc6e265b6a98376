//! Domain layer - Customer entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities are immutable once built; use the paired builders to create them
//! and to derive updated copies.

pub mod address;
pub mod constants;
pub mod customer;
pub mod enums;
pub mod error;
pub mod id;

pub use address::{Address, AddressBuilder};
pub use constants::*;
pub use customer::{Customer, CustomerBuilder};
pub use enums::{CustomerType, Gender, MaritalStatus, PhoneType};
pub use error::{DomainError, DomainResult};
pub use id::CustomerId;
