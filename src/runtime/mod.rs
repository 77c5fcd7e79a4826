//! Client runtime seams
//!
//! The pieces a REST client framework supplies around a response body:
//! - ClientResponse: status code, headers and the already-read body
//! - Consumer: turns body bytes into typed payloads
//! - ResponseReader: maps a response to a typed outcome by status code
//!
//! Transport itself lives outside this crate; anything that can produce a
//! [`ClientResponse`] plugs in.

mod consumer;
mod response;

pub use consumer::{ConsumeError, Consumer, JsonConsumer};
pub use response::{ClientResponse, RawResponse};

/// Reads a server response into an endpoint-specific outcome.
pub trait ResponseReader {
    /// Successful (or tolerated) outcome.
    type Output;
    /// Failure: a consume error or an unexpected response.
    type Error: std::error::Error;

    fn read_response<R, C>(&self, response: &R, consumer: &C) -> Result<Self::Output, Self::Error>
    where
        R: ClientResponse + ?Sized,
        C: Consumer;
}
