//! The `PersonCreated` domain event and the `EventBus` trait.
//!
//! A domain event is an immutable fact published for downstream consumers.
//! The source and detail-type strings are part of the external contract and
//! must stay stable.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::person::PersonRecord;

/// Event source carried on every published entry.
pub const EVENT_SOURCE: &str = "person-service";

/// Detail-type of the creation event.
pub const PERSON_CREATED: &str = "PersonCreated";

/// Announcement that a person was created.
///
/// The detail is the full normalized record, including the generated id and
/// both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCreated {
  pub source:      String,
  pub detail_type: String,
  pub detail:      PersonRecord,
}

impl PersonCreated {
  pub fn new(detail: PersonRecord) -> Self {
    Self {
      source:      EVENT_SOURCE.to_string(),
      detail_type: PERSON_CREATED.to_string(),
      detail,
    }
  }
}

/// Abstraction over an event-bus backend.
///
/// Publishing is a single attempt: no retry, no buffering, no rollback of
/// the preceding store write. A failure here leaves the record persisted
/// with no event seen by subscribers — the dual-write gap is surfaced to
/// the caller, not hidden.
pub trait EventBus: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn publish(
    &self,
    event: PersonCreated,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
