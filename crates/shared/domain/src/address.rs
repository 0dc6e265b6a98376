//! Address value object.

use serde::{Deserialize, Serialize};

use crate::constants::COUNTRY_REQUIRED;
use crate::error::{DomainError, DomainResult};

/// Postal address embedded in a customer.
///
/// Immutable once built. Create one with [`Address::of_country`] and derive
/// modified copies through [`Address::to_builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "AddressRecord")]
pub struct Address {
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    street_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zipcode: Option<String>,
}

impl Address {
    /// Start building an address in the given country.
    ///
    /// # Errors
    /// Returns a configuration error if `country` is `None`.
    pub fn of_country<S: Into<String>>(country: Option<S>) -> DomainResult<AddressBuilder> {
        let country = country.ok_or_else(|| DomainError::configuration(COUNTRY_REQUIRED))?;
        Ok(AddressBuilder {
            country: country.into(),
            street_number: None,
            street_name: None,
            city: None,
            state_or_province: None,
            zipcode: None,
        })
    }

    /// Builder seeded with a copy of every field of this address
    pub fn to_builder(&self) -> AddressBuilder {
        AddressBuilder::from(self)
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn street_number(&self) -> Option<i32> {
        self.street_number
    }

    pub fn street_name(&self) -> Option<&str> {
        self.street_name.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state_or_province(&self) -> Option<&str> {
        self.state_or_province.as_deref()
    }

    pub fn zipcode(&self) -> Option<&str> {
        self.zipcode.as_deref()
    }
}

/// Accumulates address fields; `build` freezes them.
#[derive(Debug, Clone)]
#[must_use]
pub struct AddressBuilder {
    country: String,
    street_number: Option<i32>,
    street_name: Option<String>,
    city: Option<String>,
    state_or_province: Option<String>,
    zipcode: Option<String>,
}

impl AddressBuilder {
    pub fn with_street_number(mut self, street_number: i32) -> Self {
        self.street_number = Some(street_number);
        self
    }

    pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
        self.street_name = Some(street_name.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state_or_province(mut self, state_or_province: impl Into<String>) -> Self {
        self.state_or_province = Some(state_or_province.into());
        self
    }

    pub fn with_zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.zipcode = Some(zipcode.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            country: self.country,
            street_number: self.street_number,
            street_name: self.street_name,
            city: self.city,
            state_or_province: self.state_or_province,
            zipcode: self.zipcode,
        }
    }
}

impl From<&Address> for AddressBuilder {
    fn from(address: &Address) -> Self {
        Self {
            country: address.country.clone(),
            street_number: address.street_number,
            street_name: address.street_name.clone(),
            city: address.city.clone(),
            state_or_province: address.state_or_province.clone(),
            zipcode: address.zipcode.clone(),
        }
    }
}

/// Wire shape of an address. Deserialization goes through the builder so a
/// missing country is rejected with the usual message.
#[derive(Deserialize)]
struct AddressRecord {
    country: Option<String>,
    street_number: Option<i32>,
    street_name: Option<String>,
    city: Option<String>,
    state_or_province: Option<String>,
    zipcode: Option<String>,
}

impl TryFrom<AddressRecord> for Address {
    type Error = DomainError;

    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        let mut builder = Address::of_country(record.country)?;
        builder.street_number = record.street_number;
        builder.street_name = record.street_name;
        builder.city = record.city;
        builder.state_or_province = record.state_or_province;
        builder.zipcode = record.zipcode;
        Ok(builder.build())
    }
}
