//! The list and create flows behind `/persons`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/persons` | 200 with the full collection, possibly empty |
//! | `POST` | `/persons` | 201 with the generated id and echoed fields |
//!
//! Creation is strictly sequential: parse → validate → persist → publish →
//! respond. There is no rollback — a publish failure after a successful
//! write surfaces as a 500 with the record already stored.

use axum::{
  Json,
  body::Bytes,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollcall_core::{
  event::{EventBus, PersonCreated},
  person::PersonRecord,
  store::PersonStore,
  validate,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{ApiError, AppState};

/// 201 response body: the confirmation message, the generated id, and the
/// validated fields echoed back.
#[derive(Serialize)]
struct CreatedBody {
  message: &'static str,
  id:      Uuid,
  #[serde(flatten)]
  record:  PersonRecord,
}

/// `GET /persons` — the full, unordered collection.
pub async fn list<S, B>(state: &AppState<S, B>) -> Result<Response, ApiError>
where
  S: PersonStore,
  B: EventBus,
{
  let persons = state
    .store
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(persons).into_response())
}

/// `POST /persons` — validate, persist, publish, respond.
pub async fn create<S, B>(
  state: &AppState<S, B>,
  body:  &Bytes,
) -> Result<Response, ApiError>
where
  S: PersonStore,
  B: EventBus,
{
  if body.is_empty() {
    return Err(ApiError::UnsupportedRequest);
  }

  let raw: Value = serde_json::from_slice(body)
    .map_err(|e| ApiError::MalformedInput(e.to_string()))?;
  tracing::info!(payload = %raw, "parsed creation payload");

  let record = validate::validate(&raw)?.into_record();

  let id = state
    .store
    .create(record.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(person_id = %id, "person record stored");

  state
    .bus
    .publish(PersonCreated::new(record.clone()))
    .await
    .map_err(|e| ApiError::Publish(Box::new(e)))?;
  tracing::info!(person_id = %id, "creation event published");

  let body = CreatedBody {
    message: "Person created successfully",
    id,
    record,
  };
  Ok((StatusCode::CREATED, Json(body)).into_response())
}
