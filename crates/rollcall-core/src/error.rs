//! Error types for `rollcall-core`.

use thiserror::Error;

/// A creation payload failed a required-field or required-shape check.
///
/// One variant per check, in check order. `Display` carries the
/// externally-visible message; callers choosing a status code branch on the
/// variant, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("firstName is required and must be a string")]
  FirstName,

  #[error("lastName is required and must be a string")]
  LastName,

  #[error("phoneNumber is required and must be a string")]
  PhoneNumber,

  #[error("address is required and must be an object")]
  Address,

  #[error("All address fields (street, city, province, zipCode, country) are required")]
  AddressFields,
}
