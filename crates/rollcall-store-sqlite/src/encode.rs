//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use rollcall_core::person::{Address, PersonRecord};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:    String,
  pub first_name:   String,
  pub last_name:    String,
  pub phone_number: String,
  pub street:       String,
  pub city:         String,
  pub province:     String,
  pub zip_code:     String,
  pub country:      String,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawPerson {
  pub fn into_record(self) -> Result<PersonRecord> {
    Ok(PersonRecord {
      person_id:    decode_uuid(&self.person_id)?,
      first_name:   self.first_name,
      last_name:    self.last_name,
      phone_number: self.phone_number,
      address:      Address {
        street:   self.street,
        city:     self.city,
        province: self.province,
        zip_code: self.zip_code,
        country:  self.country,
      },
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
