//! Error type for `rollcall-bus`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The channel stopped accepting events between the subscriber check and
  /// the send.
  #[error("event channel {0:?} is closed")]
  ChannelClosed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
