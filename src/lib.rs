//! Obsidian Events - typed client pieces for the events API
//!
//! Reads responses of `GET /events/{network_id}/{stream_name}`, whose
//! success body is a positional JSON tuple, on top of the `tuple-codec`
//! crate.

pub mod config;
pub mod events;
pub mod models;
pub mod runtime;

pub use config::{EffectiveConfig, Settings};
pub use events::{GetEventsOk, GetEventsOkBody, GetEventsReader, GetEventsResponse, ReadError};
pub use models::{ErrorPayload, Event};
pub use runtime::{ClientResponse, Consumer, JsonConsumer, RawResponse, ResponseReader};
