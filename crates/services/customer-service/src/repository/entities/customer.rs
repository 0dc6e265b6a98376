//! Customer database entity for SeaORM.

use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::{AppError, AppResult};
use domain::{Address, Customer, CustomerId, PhoneType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<Date>,
    pub marital_status: Option<String>,
    /// Embedded address as a JSON document
    pub address: Option<Json>,
    /// Phone type to number, as a JSON object
    pub phones: Option<Json>,
    pub email: Option<String>,
    pub customer_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Columns rewritten when a save replaces an existing row
pub(crate) const REPLACED_COLUMNS: [Column; 9] = [
    Column::FirstName,
    Column::LastName,
    Column::Gender,
    Column::BirthDate,
    Column::MaritalStatus,
    Column::Address,
    Column::Phones,
    Column::Email,
    Column::CustomerType,
];

fn corrupt(column: &str, err: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("Invalid value in customers.{}: {}", column, err))
}

/// Convert database model to domain entity
impl TryFrom<Model> for Customer {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let customer_type = model
            .customer_type
            .parse()
            .map_err(|e| corrupt("customer_type", e))?;

        let mut builder = Customer::of_type(Some(customer_type))
            .map_err(|e| corrupt("customer_type", e))?
            .with_id(CustomerId::from(model.id));

        if let Some(first_name) = model.first_name {
            builder = builder.with_first_name(first_name);
        }
        if let Some(last_name) = model.last_name {
            builder = builder.with_last_name(last_name);
        }
        if let Some(gender) = model.gender {
            builder = builder.with_gender(gender.parse().map_err(|e| corrupt("gender", e))?);
        }
        if let Some(birth_date) = model.birth_date {
            builder = builder.with_birth_date(birth_date);
        }
        if let Some(status) = model.marital_status {
            builder = builder
                .with_marital_status(status.parse().map_err(|e| corrupt("marital_status", e))?);
        }
        if let Some(address) = model.address {
            let address: Address =
                serde_json::from_value(address).map_err(|e| corrupt("address", e))?;
            builder = builder.with_address(address);
        }
        if let Some(phones) = model.phones {
            let phones: HashMap<PhoneType, String> =
                serde_json::from_value(phones).map_err(|e| corrupt("phones", e))?;
            for (phone_type, number) in phones {
                builder = builder.with_phone(phone_type, number);
            }
        }
        if let Some(email) = model.email {
            builder = builder.with_email(email);
        }

        Ok(builder.build())
    }
}

/// Build a fully populated active model for a customer that already has an id.
pub(crate) fn to_active_model(id: CustomerId, customer: &Customer) -> AppResult<ActiveModel> {
    let address = customer
        .address()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::internal(format!("Address serialization failed: {}", e)))?;

    let phones = customer.phones();
    let phones = if phones.is_empty() {
        None
    } else {
        Some(
            serde_json::to_value(phones)
                .map_err(|e| AppError::internal(format!("Phones serialization failed: {}", e)))?,
        )
    };

    Ok(ActiveModel {
        id: Set(id.as_uuid()),
        first_name: Set(customer.first_name().map(str::to_string)),
        last_name: Set(customer.last_name().map(str::to_string)),
        gender: Set(customer.gender().map(|g| g.as_str().to_string())),
        birth_date: Set(customer.birth_date()),
        marital_status: Set(customer.marital_status().map(|s| s.as_str().to_string())),
        address: Set(address),
        phones: Set(phones),
        email: Set(customer.email().map(str::to_string)),
        customer_type: Set(customer.customer_type().as_str().to_string()),
    })
}
