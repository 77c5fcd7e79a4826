//! Body consumers.

use serde::de::DeserializeOwned;
use tuple_codec::{DecodeError, DecodeOptions, TupleRecord};

/// Consumer errors
#[derive(Debug, thiserror::Error)]
pub enum ConsumeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuple body: {0}")]
    Tuple(#[from] DecodeError),
}

/// Deserializes response bodies.
pub trait Consumer {
    /// Decode a key-based JSON body.
    fn consume<T>(&self, body: &[u8]) -> Result<T, ConsumeError>
    where
        T: DeserializeOwned + Default;

    /// Decode a positional (array-encoded) body.
    fn consume_tuple<T>(&self, body: &[u8]) -> Result<T, ConsumeError>
    where
        T: TupleRecord;
}

/// JSON consumer.
///
/// An empty (or all-whitespace) body carries no payload and yields
/// `T::default()`; the caller's validation decides whether that is acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonConsumer {
    options: DecodeOptions,
}

impl JsonConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given options for tuple bodies.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

impl Consumer for JsonConsumer {
    fn consume<T>(&self, body: &[u8]) -> Result<T, ConsumeError>
    where
        T: DeserializeOwned + Default,
    {
        if is_blank(body) {
            log::debug!("empty response body, using default payload");
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(body)?)
    }

    fn consume_tuple<T>(&self, body: &[u8]) -> Result<T, ConsumeError>
    where
        T: TupleRecord,
    {
        if is_blank(body) {
            log::debug!("empty response body, using empty tuple");
            return Ok(T::default());
        }
        Ok(tuple_codec::decode_with(body, &self.options)?)
    }
}
