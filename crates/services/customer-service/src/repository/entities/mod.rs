//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod customer;

pub use customer::{ActiveModel as CustomerActiveModel, Entity as CustomerEntity, Model as CustomerModel};
