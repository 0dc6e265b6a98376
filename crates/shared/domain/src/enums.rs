//! Customer enumerations.
//!
//! Each enumeration has a stable upper-case string form shared by the wire
//! format and the database columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of customer. Changes how the other customer fields are read:
/// for a company, `last_name` holds the company name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Person,
    Company,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Person => "PERSON",
            CustomerType::Company => "COMPANY",
        }
    }
}

impl FromStr for CustomerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERSON" => Ok(CustomerType::Person),
            "COMPANY" => Ok(CustomerType::Company),
            _ => Err(DomainError::invalid_value("customer type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(DomainError::invalid_value("gender", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "SINGLE",
            MaritalStatus::Married => "MARRIED",
            MaritalStatus::Divorced => "DIVORCED",
            MaritalStatus::Widowed => "WIDOWED",
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE" => Ok(MaritalStatus::Single),
            "MARRIED" => Ok(MaritalStatus::Married),
            "DIVORCED" => Ok(MaritalStatus::Divorced),
            "WIDOWED" => Ok(MaritalStatus::Widowed),
            _ => Err(DomainError::invalid_value("marital status", s)),
        }
    }
}

/// Phone slot. A customer holds at most one number per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneType {
    Home,
    Cellular,
    Office,
    Fax,
}

impl PhoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Home => "HOME",
            PhoneType::Cellular => "CELLULAR",
            PhoneType::Office => "OFFICE",
            PhoneType::Fax => "FAX",
        }
    }
}

impl FromStr for PhoneType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOME" => Ok(PhoneType::Home),
            "CELLULAR" => Ok(PhoneType::Cellular),
            "OFFICE" => Ok(PhoneType::Office),
            "FAX" => Ok(PhoneType::Fax),
            _ => Err(DomainError::invalid_value("phone type", s)),
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
