//! In-process event-bus backend for Rollcall.
//!
//! [`ChannelBus`] carries `PersonCreated` events on a named broadcast
//! channel. Construct one per process and share the handle across requests;
//! the underlying sender is reference-counted.

mod bus;

pub mod error;

pub use bus::ChannelBus;
pub use error::{Error, Result};
