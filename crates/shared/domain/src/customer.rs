//! Customer domain entity and its builder.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::constants::CUSTOMER_TYPE_REQUIRED;
use crate::enums::{CustomerType, Gender, MaritalStatus, PhoneType};
use crate::error::{DomainError, DomainResult};
use crate::id::CustomerId;

/// Customer domain entity.
///
/// A `Customer` is immutable. Use [`Customer::of_type`] to create one and
/// [`Customer::to_builder`] to derive an updated copy:
///
/// ```
/// use domain::{Customer, CustomerType};
///
/// let ken = Customer::of_type(CustomerType::Person)?
///     .with_first_name("Ken")
///     .build();
/// let renamed = ken.to_builder().with_first_name("Bison").build();
///
/// assert_eq!(ken.first_name(), Some("Ken"));
/// assert_eq!(renamed.first_name(), Some("Bison"));
/// # Ok::<(), domain::DomainError>(())
/// ```
///
/// For a [`CustomerType::Company`] the `last_name` field carries the company
/// name, and `first_name`, `gender`, `birth_date` and `marital_status` are
/// not relevant. They are not cleared automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marital_status: Option<MaritalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    phones: Option<HashMap<PhoneType, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    customer_type: CustomerType,
}

impl Customer {
    /// Start building a customer of the given type.
    ///
    /// # Errors
    /// Returns a configuration error if no type is given. The check happens
    /// here, not in `build`.
    pub fn of_type(customer_type: impl Into<Option<CustomerType>>) -> DomainResult<CustomerBuilder> {
        let customer_type = customer_type
            .into()
            .ok_or_else(|| DomainError::configuration(CUSTOMER_TYPE_REQUIRED))?;

        Ok(CustomerBuilder {
            id: None,
            first_name: None,
            last_name: None,
            gender: None,
            birth_date: None,
            marital_status: None,
            address: None,
            phones: None,
            email: None,
            customer_type,
        })
    }

    /// Builder seeded with a copy of every field, phones included
    pub fn to_builder(&self) -> CustomerBuilder {
        CustomerBuilder::from(self)
    }

    /// Identifier, set once the customer has been saved
    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Family name, or the company name for a company
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn marital_status(&self) -> Option<MaritalStatus> {
        self.marital_status
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Phones by type. Returns a copy; changing it does not affect the customer.
    pub fn phones(&self) -> HashMap<PhoneType, String> {
        self.phones.clone().unwrap_or_default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    /// Check if this customer is a company
    pub fn is_company(&self) -> bool {
        matches!(self.customer_type, CustomerType::Company)
    }
}

/// Accumulates customer fields; `build` freezes them.
///
/// Only obtainable through [`Customer::of_type`] or from an existing
/// customer, so the type is always present.
#[derive(Debug, Clone)]
#[must_use]
pub struct CustomerBuilder {
    id: Option<CustomerId>,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<Gender>,
    birth_date: Option<NaiveDate>,
    marital_status: Option<MaritalStatus>,
    address: Option<Address>,
    phones: Option<HashMap<PhoneType, String>>,
    email: Option<String>,
    customer_type: CustomerType,
}

impl CustomerBuilder {
    /// Set the identifier. Normally only storage adapters do this.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Clear the identifier so the next save creates a new record
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_marital_status(mut self, marital_status: MaritalStatus) -> Self {
        self.marital_status = Some(marital_status);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Add a phone number. The phone type is the key, so a second number
    /// for the same type replaces the first.
    pub fn with_phone(mut self, phone_type: PhoneType, number: impl Into<String>) -> Self {
        self.phones
            .get_or_insert_with(HashMap::new)
            .insert(phone_type, number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Customer {
        Customer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birth_date: self.birth_date,
            marital_status: self.marital_status,
            address: self.address,
            phones: self.phones,
            email: self.email,
            customer_type: self.customer_type,
        }
    }
}

impl From<&Customer> for CustomerBuilder {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            gender: customer.gender,
            birth_date: customer.birth_date,
            marital_status: customer.marital_status,
            address: customer.address.clone(),
            phones: customer.phones.clone(),
            email: customer.email.clone(),
            customer_type: customer.customer_type,
        }
    }
}

/// Wire shape of a customer. Deserialization goes through the builder so a
/// missing type is rejected with the usual message.
#[derive(Deserialize)]
struct CustomerRecord {
    id: Option<CustomerId>,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<Gender>,
    birth_date: Option<NaiveDate>,
    marital_status: Option<MaritalStatus>,
    address: Option<Address>,
    phones: Option<HashMap<PhoneType, String>>,
    email: Option<String>,
    customer_type: Option<CustomerType>,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DomainError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let mut builder = Customer::of_type(record.customer_type)?;
        builder.id = record.id;
        builder.first_name = record.first_name;
        builder.last_name = record.last_name;
        builder.gender = record.gender;
        builder.birth_date = record.birth_date;
        builder.marital_status = record.marital_status;
        builder.address = record.address;
        builder.phones = record.phones.filter(|phones| !phones.is_empty());
        builder.email = record.email;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shadaloo() -> Address {
        Address::of_country(Some("Shadaloo"))
            .unwrap()
            .with_street_number(110)
            .with_street_name("Bison street")
            .with_city("Shadaloo City")
            .with_zipcode("123456")
            .build()
    }

    fn acme() -> Customer {
        Customer::of_type(CustomerType::Company)
            .unwrap()
            .with_last_name("Acme Corp.")
            .with_address(shadaloo())
            .with_phone(PhoneType::Home, "111111111")
            .with_phone(PhoneType::Cellular, "222222222")
            .with_phone(PhoneType::Office, "333333333 Ext123")
            .with_phone(PhoneType::Fax, "444444444")
            .with_email("kmasters@streetf.com")
            .build()
    }

    fn expected_phones() -> HashMap<PhoneType, String> {
        HashMap::from([
            (PhoneType::Home, "111111111".to_string()),
            (PhoneType::Cellular, "222222222".to_string()),
            (PhoneType::Office, "333333333 Ext123".to_string()),
            (PhoneType::Fax, "444444444".to_string()),
        ])
    }

    #[test]
    fn test_build_person() {
        let customer = Customer::of_type(CustomerType::Person)
            .unwrap()
            .with_first_name("Ken")
            .with_last_name("Masters")
            .with_gender(Gender::Male)
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 3, 16).unwrap())
            .with_marital_status(MaritalStatus::Single)
            .with_address(shadaloo())
            .with_phone(PhoneType::Home, "111111111")
            .with_phone(PhoneType::Cellular, "222222222")
            .with_phone(PhoneType::Office, "333333333 Ext123")
            .with_phone(PhoneType::Fax, "444444444")
            .with_email("kmasters@streetf.com")
            .build();

        assert_eq!(customer.customer_type(), CustomerType::Person);
        assert_eq!(customer.first_name(), Some("Ken"));
        assert_eq!(customer.last_name(), Some("Masters"));
        assert_eq!(customer.gender(), Some(Gender::Male));
        assert_eq!(customer.birth_date(), NaiveDate::from_ymd_opt(1990, 3, 16));
        assert_eq!(customer.marital_status(), Some(MaritalStatus::Single));
        assert_eq!(customer.address().and_then(Address::zipcode), Some("123456"));
        assert_eq!(customer.phones(), expected_phones());
        assert_eq!(customer.email(), Some("kmasters@streetf.com"));
        assert_eq!(customer.id(), None);
    }

    #[test]
    fn test_build_person_with_birth_date_only() {
        let customer = Customer::of_type(CustomerType::Person)
            .unwrap()
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 8, 16).unwrap())
            .build();

        assert_eq!(customer.first_name(), None);
        assert_eq!(customer.birth_date(), NaiveDate::from_ymd_opt(1990, 8, 16));
        assert_eq!(customer.customer_type(), CustomerType::Person);
    }

    #[test]
    fn test_build_company() {
        let customer = acme();

        assert!(customer.is_company());
        assert_eq!(customer.last_name(), Some("Acme Corp."));
        assert_eq!(customer.gender(), None);
        assert_eq!(customer.birth_date(), None);
        assert_eq!(customer.marital_status(), None);
        assert_eq!(customer.phones(), expected_phones());
    }

    #[test]
    fn test_every_type_builds() {
        for customer_type in [CustomerType::Person, CustomerType::Company] {
            let customer = Customer::of_type(customer_type).unwrap().build();
            assert_eq!(customer.customer_type(), customer_type);
        }
    }

    #[test]
    fn test_missing_type_fails() {
        let err = Customer::of_type(None).unwrap_err();
        assert_eq!(err, DomainError::Configuration(CUSTOMER_TYPE_REQUIRED.to_string()));
        assert_eq!(err.to_string(), "Customer type can not be null.");
    }

    #[test]
    fn test_update_company_name() {
        let original = acme();

        let updated = original.to_builder().with_last_name("Acme Inc.").build();

        assert_eq!(updated.last_name(), Some("Acme Inc."));
        assert_eq!(updated.customer_type(), CustomerType::Company);
        assert_eq!(updated.address().and_then(Address::zipcode), Some("123456"));
        assert_eq!(updated.phones(), expected_phones());
        assert_eq!(updated.email(), Some("kmasters@streetf.com"));
        assert_eq!(original.last_name(), Some("Acme Corp."));
    }

    #[test]
    fn test_copy_then_override_changes_only_that_field() {
        let original = Customer::of_type(CustomerType::Person)
            .unwrap()
            .with_id(CustomerId::generate())
            .with_first_name("Ken")
            .with_last_name("Masters")
            .with_gender(Gender::Male)
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 3, 16).unwrap())
            .with_marital_status(MaritalStatus::Single)
            .with_address(shadaloo())
            .with_phone(PhoneType::Home, "111111111")
            .with_email("ken@example.com")
            .build();

        let updated = original.to_builder().with_first_name("Ryu").build();
        assert_eq!(updated.first_name(), Some("Ryu"));
        assert_eq!(
            updated.to_builder().with_first_name("Ken").build(),
            original
        );

        let updated = original.to_builder().with_gender(Gender::Female).build();
        assert_eq!(updated.gender(), Some(Gender::Female));
        assert_eq!(updated.to_builder().with_gender(Gender::Male).build(), original);

        let updated = original
            .to_builder()
            .with_marital_status(MaritalStatus::Married)
            .build();
        assert_eq!(
            updated
                .to_builder()
                .with_marital_status(MaritalStatus::Single)
                .build(),
            original
        );

        let updated = original.to_builder().with_email("other@example.com").build();
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.email(), Some("other@example.com"));
        assert_eq!(updated.phones(), original.phones());

        let birth_date = NaiveDate::from_ymd_opt(1987, 8, 30).unwrap();
        let updated = original.to_builder().with_birth_date(birth_date).build();
        assert_eq!(updated.birth_date(), Some(birth_date));
        assert_eq!(
            updated
                .to_builder()
                .with_birth_date(NaiveDate::from_ymd_opt(1990, 3, 16).unwrap())
                .build(),
            original
        );

        let moved = shadaloo().to_builder().with_city("Metro City").build();
        let updated = original.to_builder().with_address(moved.clone()).build();
        assert_eq!(updated.address(), Some(&moved));
        assert_eq!(updated.to_builder().with_address(shadaloo()).build(), original);

        let other_id = CustomerId::generate();
        let updated = original.to_builder().with_id(other_id).build();
        assert_eq!(updated.id(), Some(other_id));
        assert_eq!(
            updated.to_builder().with_id(original.id().unwrap()).build(),
            original
        );

        let updated = original
            .to_builder()
            .with_phone(PhoneType::Office, "333333333")
            .build();
        assert_eq!(updated.phones().len(), 2);
        assert_eq!(updated.phones()[&PhoneType::Home], "111111111");
        assert_eq!(updated.phones()[&PhoneType::Office], "333333333");
        assert_eq!(updated.first_name(), original.first_name());
        assert_eq!(updated.address(), original.address());
        assert_eq!(updated.id(), original.id());

        // Every override above worked on a copy
        assert_eq!(original.first_name(), Some("Ken"));
        assert_eq!(original.birth_date(), NaiveDate::from_ymd_opt(1990, 3, 16));
        assert_eq!(original.address(), Some(&shadaloo()));
        assert_eq!(original.phones().len(), 1);
    }

    #[test]
    fn test_phones_are_defensive_copies() {
        let customer = acme();

        let mut phones = customer.phones();
        phones.insert(PhoneType::Home, "999".to_string());
        phones.remove(&PhoneType::Fax);

        assert_eq!(customer.phones(), expected_phones());
    }

    #[test]
    fn test_builder_copy_does_not_alias_source_phones() {
        let original = acme();

        let updated = original
            .to_builder()
            .with_phone(PhoneType::Home, "555555555")
            .build();

        assert_eq!(updated.phones()[&PhoneType::Home], "555555555");
        assert_eq!(original.phones()[&PhoneType::Home], "111111111");
    }

    #[test]
    fn test_same_phone_type_overwrites() {
        let customer = Customer::of_type(CustomerType::Person)
            .unwrap()
            .with_phone(PhoneType::Office, "1")
            .with_phone(PhoneType::Office, "2")
            .build();

        assert_eq!(customer.phones().len(), 1);
        assert_eq!(customer.phones()[&PhoneType::Office], "2");
    }

    #[test]
    fn test_serialization_format() {
        let id = CustomerId::generate();
        let customer = Customer::of_type(CustomerType::Person)
            .unwrap()
            .with_id(id)
            .with_first_name("Ken")
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 8, 16).unwrap())
            .with_phone(PhoneType::Cellular, "222222222")
            .build();

        let json = serde_json::to_value(&customer).unwrap();

        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["first_name"], "Ken");
        assert_eq!(json["birth_date"], "1990-08-16");
        assert_eq!(json["customer_type"], "PERSON");
        assert_eq!(json["phones"]["CELLULAR"], "222222222");
        assert!(json.get("last_name").is_none());
        assert!(json.get("address").is_none());
    }

    #[test]
    fn test_deserialization_round_trip() {
        let customer = acme().to_builder().with_id(CustomerId::generate()).build();

        let json = serde_json::to_string(&customer).unwrap();
        let parsed: Customer = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, customer);
    }

    #[test]
    fn test_deserialization_requires_type() {
        let err = serde_json::from_str::<Customer>(r#"{"first_name":"Ken"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Customer type can not be null."));
    }

    #[test]
    fn test_deserialization_ignores_unknown_fields() {
        let customer: Customer =
            serde_json::from_str(r#"{"customer_type":"COMPANY","last_name":"Acme","fax":"1"}"#)
                .unwrap();
        assert!(customer.is_company());
        assert_eq!(customer.last_name(), Some("Acme"));
    }

    #[test]
    fn test_deserialization_empty_phones_same_as_none() {
        let with_empty: Customer =
            serde_json::from_str(r#"{"customer_type":"PERSON","phones":{}}"#).unwrap();
        let without: Customer = serde_json::from_str(r#"{"customer_type":"PERSON"}"#).unwrap();

        assert_eq!(with_empty, without);
        assert!(serde_json::to_value(&with_empty).unwrap().get("phones").is_none());
    }
}
