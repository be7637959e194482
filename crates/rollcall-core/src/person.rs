//! Person record types — the normalized representation of a registrant.
//!
//! A record is either fully valid (every required field present) or it never
//! reaches storage; partial records are rejected up front by the validator.
//! Wire and persisted layouts use camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A postal address. No independent identity; always embedded in a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub street:   String,
  pub city:     String,
  pub province: String,
  pub zip_code: String,
  pub country:  String,
}

/// The persisted representation of a registrant.
///
/// `person_id` is assigned server-side exactly once and never reused. There
/// is no update path, so `created_at` and `updated_at` carry the same
/// instant for the record's lifetime. Timestamps serialise as RFC 3339
/// strings, which sort lexicographically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
  pub person_id:    Uuid,
  pub first_name:   String,
  pub last_name:    String,
  pub phone_number: String,
  pub address:      Address,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// A validated creation candidate — everything but the server-assigned id
/// and timestamps. Output of [`crate::validate::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub first_name:   String,
  pub last_name:    String,
  pub phone_number: String,
  pub address:      Address,
}

impl NewPerson {
  /// Promote the candidate to a full record with a fresh id and timestamps.
  pub fn into_record(self) -> PersonRecord {
    let now = Utc::now();
    PersonRecord {
      person_id:    Uuid::new_v4(),
      first_name:   self.first_name,
      last_name:    self.last_name,
      phone_number: self.phone_number,
      address:      self.address,
      created_at:   now,
      updated_at:   now,
    }
  }
}
