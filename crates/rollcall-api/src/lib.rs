//! JSON HTTP layer for Rollcall.
//!
//! Exposes an axum [`Router`] implementing the person-registration contract,
//! backed by any [`PersonStore`] and [`EventBus`] pair. TLS and transport
//! concerns are the caller's responsibility.

pub mod error;
pub mod persons;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  body::{Body, Bytes},
  extract::{Request, State},
  response::{IntoResponse, Response},
  routing::any,
};
use rollcall_core::{event::EventBus, store::PersonStore};
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime service configuration, deserialised from `config.toml`.
///
/// `store_path` identifies the storage backend; `event_channel` names the
/// channel creation events are published on. Both resolve once at startup —
/// a missing field fails construction, never the first request.
#[derive(Deserialize, Clone)]
pub struct ServiceConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  pub event_channel: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// Both handles are constructed once per process and reused across requests;
/// each is safe for concurrent use.
#[derive(Clone)]
pub struct AppState<S, B> {
  pub store: Arc<S>,
  pub bus:   Arc<B>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the service.
///
/// `/persons` dispatches on method inside the handler; every other path
/// falls through to the same 400 response.
pub fn router<S, B>(state: AppState<S, B>) -> Router
where
  S: PersonStore + Clone + Send + Sync + 'static,
  B: EventBus + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/persons", any(persons_handler::<S, B>))
    .fallback(unsupported_handler)
    .with_state(state)
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Upper bound on accepted request bodies.
const BODY_LIMIT: usize = 1024 * 1024;

async fn collect_body(req: Request<Body>) -> Result<Bytes, ApiError> {
  axum::body::to_bytes(req.into_body(), BODY_LIMIT)
    .await
    .map_err(|e| ApiError::MalformedInput(e.to_string()))
}

async fn persons_handler<S, B>(
  State(state): State<AppState<S, B>>,
  req: Request<Body>,
) -> Response
where
  S: PersonStore + Clone + Send + Sync + 'static,
  B: EventBus + Clone + Send + Sync + 'static,
{
  let method = req.method().clone();
  tracing::info!(method = %method, uri = %req.uri(), "received request");

  let result = match method.as_str() {
    "GET"  => persons::list(&state).await,
    "POST" => match collect_body(req).await {
      Ok(body) => persons::create(&state, &body).await,
      Err(e)   => Err(e),
    },
    _ => Err(ApiError::UnsupportedRequest),
  };

  match result {
    Ok(r)  => r,
    Err(e) => e.into_response(),
  }
}

async fn unsupported_handler() -> Response {
  ApiError::UnsupportedRequest.into_response()
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::{collections::HashSet, sync::Arc};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rollcall_bus::ChannelBus;
  use rollcall_core::event::{
    EVENT_SOURCE, EventBus, PERSON_CREATED, PersonCreated,
  };
  use rollcall_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn make_state() -> (AppState<SqliteStore, ChannelBus>, ChannelBus) {
    let bus = ChannelBus::new("PersonEventBus");
    let state = AppState {
      store: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      bus:   Arc::new(bus.clone()),
    };
    (state, bus)
  }

  fn ada() -> Value {
    json!({
      "firstName": "Ada",
      "lastName": "Lovelace",
      "phoneNumber": "555-0100",
      "address": {
        "street": "1 Main St",
        "city": "London",
        "province": "LDN",
        "zipCode": "E1 6AN",
        "country": "UK"
      }
    })
  }

  async fn oneshot<S, B>(
    state:  AppState<S, B>,
    method: &str,
    uri:    &str,
    body:   &str,
  ) -> axum::response::Response
  where
    S: PersonStore + Clone + Send + Sync + 'static,
    B: EventBus + Clone + Send + Sync + 'static,
  {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Create ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_valid_payload_returns_201_with_id_and_fields() {
    let (state, _bus) = make_state().await;
    let resp = oneshot(state, "POST", "/persons", &ada().to_string()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Person created successfully");
    assert_eq!(body["id"], body["personId"]);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
    assert_eq!(body["phoneNumber"], "555-0100");
    assert_eq!(body["address"]["zipCode"], "E1 6AN");
    assert_eq!(body["address"]["country"], "UK");
    assert_eq!(body["createdAt"], body["updatedAt"]);
  }

  #[tokio::test]
  async fn post_then_get_includes_the_record() {
    let (state, _bus) = make_state().await;

    let post = oneshot(state.clone(), "POST", "/persons", &ada().to_string()).await;
    let id = body_json(post).await["id"].as_str().unwrap().to_string();

    let get = oneshot(state, "GET", "/persons", "").await;
    assert_eq!(get.status(), StatusCode::OK);

    let list = body_json(get).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["personId"], id.as_str());
    assert_eq!(list[0]["firstName"], "Ada");
    assert_eq!(list[0]["address"]["city"], "London");
  }

  #[tokio::test]
  async fn ids_are_unique_across_creations() {
    let (state, _bus) = make_state().await;

    for _ in 0..3 {
      let resp =
        oneshot(state.clone(), "POST", "/persons", &ada().to_string()).await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let list = body_json(oneshot(state, "GET", "/persons", "").await).await;
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 3);

    let ids: HashSet<String> = list
      .iter()
      .map(|p| p["personId"].as_str().unwrap().to_string())
      .collect();
    assert_eq!(ids.len(), 3);
  }

  // ── Read ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_with_no_records_returns_empty_array() {
    let (state, _bus) = make_state().await;
    let resp = oneshot(state, "GET", "/persons", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
  }

  // ── Validation failures ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_top_level_field_returns_400_and_persists_nothing() {
    for field in ["firstName", "lastName", "phoneNumber", "address"] {
      let (state, _bus) = make_state().await;

      let mut payload = ada();
      payload.as_object_mut().unwrap().remove(field);

      let resp =
        oneshot(state.clone(), "POST", "/persons", &payload.to_string()).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field: {field}");

      let message = body_json(resp).await["message"]
        .as_str()
        .unwrap()
        .to_string();
      assert!(message.contains("required"), "message: {message}");

      let list = body_json(oneshot(state, "GET", "/persons", "").await).await;
      assert_eq!(list, json!([]), "field: {field}");
    }
  }

  #[tokio::test]
  async fn missing_address_subfield_returns_400_and_persists_nothing() {
    let (state, _bus) = make_state().await;

    let mut payload = ada();
    payload["address"].as_object_mut().unwrap().remove("province");

    let resp =
      oneshot(state.clone(), "POST", "/persons", &payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      body_json(resp).await["message"],
      "All address fields (street, city, province, zipCode, country) are required",
    );

    let list = body_json(oneshot(state, "GET", "/persons", "").await).await;
    assert_eq!(list, json!([]));
  }

  // ── Malformed input ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn non_json_body_returns_500_and_persists_nothing() {
    // The 400/500 asymmetry between validation and parse failures is part
    // of the contract.
    let (state, _bus) = make_state().await;

    let resp = oneshot(state.clone(), "POST", "/persons", "not json").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Internal server error");
    assert!(body["error"].is_string());

    let list = body_json(oneshot(state, "GET", "/persons", "").await).await;
    assert_eq!(list, json!([]));
  }

  // ── Unsupported requests ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_without_body_returns_400() {
    let (state, _bus) = make_state().await;
    let resp = oneshot(state, "POST", "/persons", "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      body_json(resp).await["message"],
      "Unsupported method or missing payload",
    );
  }

  #[tokio::test]
  async fn unsupported_method_returns_400() {
    let (state, _bus) = make_state().await;
    let resp = oneshot(state, "DELETE", "/persons", "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      body_json(resp).await["message"],
      "Unsupported method or missing payload",
    );
  }

  #[tokio::test]
  async fn unknown_path_returns_400() {
    let (state, _bus) = make_state().await;
    let resp = oneshot(state, "GET", "/widgets", "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      body_json(resp).await["message"],
      "Unsupported method or missing payload",
    );
  }

  // ── Events ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn creation_publishes_the_full_record() {
    let (state, bus) = make_state().await;
    let mut rx = bus.subscribe();

    let resp = oneshot(state, "POST", "/persons", &ada().to_string()).await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let event = rx.recv().await.unwrap();
    assert_eq!(event.source, EVENT_SOURCE);
    assert_eq!(event.detail_type, PERSON_CREATED);
    assert_eq!(event.detail.person_id.to_string(), id);
    assert_eq!(event.detail.first_name, "Ada");
    assert_eq!(event.detail.address.zip_code, "E1 6AN");
  }

  // ── Dual-write gap ───────────────────────────────────────────────────────────

  #[derive(Debug, Clone)]
  struct FailingBus;

  #[derive(Debug, thiserror::Error)]
  #[error("event bus unavailable")]
  struct BusDown;

  impl EventBus for FailingBus {
    type Error = BusDown;

    async fn publish(&self, _event: PersonCreated) -> Result<(), BusDown> {
      Err(BusDown)
    }
  }

  #[tokio::test]
  async fn publish_failure_returns_500_but_the_record_is_stored() {
    let state = AppState {
      store: Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      bus:   Arc::new(FailingBus),
    };

    let resp =
      oneshot(state.clone(), "POST", "/persons", &ada().to_string()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["message"], "Internal server error");

    // The write preceded the failed publish; the record is visible.
    let list = body_json(oneshot(state, "GET", "/persons", "").await).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["firstName"], "Ada");
  }
}
