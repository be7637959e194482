//! [`ChannelBus`] — the broadcast-channel implementation of [`EventBus`].

use rollcall_core::event::{EventBus, PersonCreated};
use tokio::sync::broadcast;

use crate::{Error, Result};

/// Capacity of the underlying broadcast channel. A subscriber that lags
/// further than this behind the newest event starts seeing
/// `RecvError::Lagged`.
const CHANNEL_CAPACITY: usize = 256;

/// An in-process event bus carrying [`PersonCreated`] events on a named
/// channel.
///
/// Cloning is cheap — clones share the underlying sender. Publishing with
/// no live subscribers succeeds; events are not buffered for subscribers
/// that attach later.
#[derive(Clone)]
pub struct ChannelBus {
  channel: String,
  tx:      broadcast::Sender<PersonCreated>,
}

impl ChannelBus {
  /// Create a bus for the named event channel.
  pub fn new(channel: impl Into<String>) -> Self {
    let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
    Self { channel: channel.into(), tx }
  }

  /// The configured channel name.
  pub fn channel(&self) -> &str { &self.channel }

  /// Attach a subscriber. Only events published after this call are seen.
  pub fn subscribe(&self) -> broadcast::Receiver<PersonCreated> {
    self.tx.subscribe()
  }
}

impl EventBus for ChannelBus {
  type Error = Error;

  async fn publish(&self, event: PersonCreated) -> Result<()> {
    tracing::debug!(
      channel = %self.channel,
      person_id = %event.detail.person_id,
      "publishing {}", event.detail_type,
    );

    if self.tx.receiver_count() == 0 {
      return Ok(());
    }
    self
      .tx
      .send(event)
      .map(|_| ())
      .map_err(|_| Error::ChannelClosed(self.channel.clone()))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rollcall_core::{
    event::{EVENT_SOURCE, EventBus as _, PERSON_CREATED, PersonCreated},
    person::{Address, NewPerson},
  };

  use super::ChannelBus;

  fn sample_event() -> PersonCreated {
    PersonCreated::new(
      NewPerson {
        first_name:   "Ada".to_string(),
        last_name:    "Lovelace".to_string(),
        phone_number: "555-0100".to_string(),
        address:      Address {
          street:   "1 Main St".to_string(),
          city:     "London".to_string(),
          province: "LDN".to_string(),
          zip_code: "E1 6AN".to_string(),
          country:  "UK".to_string(),
        },
      }
      .into_record(),
    )
  }

  #[tokio::test]
  async fn publish_reaches_subscriber() {
    let bus = ChannelBus::new("PersonEventBus");
    let mut rx = bus.subscribe();

    bus.publish(sample_event()).await.unwrap();

    let got = rx.recv().await.unwrap();
    assert_eq!(got.source, EVENT_SOURCE);
    assert_eq!(got.detail_type, PERSON_CREATED);
    assert_eq!(got.detail.first_name, "Ada");
  }

  #[tokio::test]
  async fn publish_without_subscribers_succeeds() {
    let bus = ChannelBus::new("PersonEventBus");
    bus.publish(sample_event()).await.unwrap();
  }

  #[tokio::test]
  async fn each_subscriber_sees_every_event() {
    let bus = ChannelBus::new("PersonEventBus");
    let mut rx_a = bus.subscribe();
    let mut rx_b = bus.subscribe();

    bus.publish(sample_event()).await.unwrap();
    bus.publish(sample_event()).await.unwrap();

    for rx in [&mut rx_a, &mut rx_b] {
      let first  = rx.recv().await.unwrap();
      let second = rx.recv().await.unwrap();
      assert_ne!(first.detail.person_id, second.detail.person_id);
    }
  }

  #[tokio::test]
  async fn clones_share_the_channel() {
    let bus = ChannelBus::new("PersonEventBus");
    let mut rx = bus.subscribe();

    bus.clone().publish(sample_event()).await.unwrap();
    assert!(rx.recv().await.is_ok());
  }
}
