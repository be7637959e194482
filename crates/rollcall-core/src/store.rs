//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `rollcall-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::person::PersonRecord;

/// Abstraction over a person storage backend.
///
/// Writes are unconditional puts keyed by `person_id` — no existence check,
/// no optimistic concurrency. Uniqueness comes from the id generator, not
/// from the store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `record`, replacing any previous record under the same id.
  /// Returns the stored id.
  fn create(
    &self,
    record: PersonRecord,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// Enumerate every stored record.
  ///
  /// Unordered; callers must not assume any sort order or pagination. This
  /// is a full-table scan semantically, acceptable only at small scale.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + '_;
}
