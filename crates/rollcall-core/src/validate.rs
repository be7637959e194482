//! Payload validation for person creation requests.
//!
//! [`validate`] is a pure function over the raw JSON body: no side effects,
//! no I/O. Checks run in a fixed order and short-circuit at the first
//! failure, so a payload missing several fields reports only the first.

use serde_json::Value;

use crate::{
  error::ValidationError,
  person::{Address, NewPerson},
};

/// Extract a required non-empty string field. An absent field, a non-string
/// value, and an empty string all fail identically.
fn required_string(raw: &Value, field: &str) -> Option<String> {
  match raw.get(field) {
    Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
    _ => None,
  }
}

/// Check a raw creation payload against the person schema.
///
/// Check order is part of the contract: `firstName`, `lastName`,
/// `phoneNumber`, the `address` shape, then the five address sub-fields as
/// a single collective check.
pub fn validate(raw: &Value) -> Result<NewPerson, ValidationError> {
  let first_name =
    required_string(raw, "firstName").ok_or(ValidationError::FirstName)?;
  let last_name =
    required_string(raw, "lastName").ok_or(ValidationError::LastName)?;
  let phone_number =
    required_string(raw, "phoneNumber").ok_or(ValidationError::PhoneNumber)?;

  let address_raw = match raw.get("address") {
    Some(v @ Value::Object(_)) => v,
    _ => return Err(ValidationError::Address),
  };

  let address = match (
    required_string(address_raw, "street"),
    required_string(address_raw, "city"),
    required_string(address_raw, "province"),
    required_string(address_raw, "zipCode"),
    required_string(address_raw, "country"),
  ) {
    (Some(street), Some(city), Some(province), Some(zip_code), Some(country)) => {
      Address { street, city, province, zip_code, country }
    }
    _ => return Err(ValidationError::AddressFields),
  };

  Ok(NewPerson { first_name, last_name, phone_number, address })
}
