//! Body models for the events API.

mod error;
mod event;

pub use error::ErrorPayload;
pub use event::Event;
