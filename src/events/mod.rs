//! `GET /events/{network_id}/{stream_name}`
//!
//! A successful response carries its event as a one-element JSON array,
//! `[ <event> ]`, decoded positionally by [`GetEventsOkBody`]. Any other
//! status carries an [`ErrorPayload`].

mod reader;

use std::fmt;

use tuple_codec::{tuple_record, Validate, ValidationErrors};

use crate::models::{ErrorPayload, Event};

pub use reader::{GetEventsReader, ReadError};

/// Method and path template, used in outcome messages.
pub const OPERATION: &str = "GET /events/{network_id}/{stream_name}";

tuple_record! {
    /// Tuple body of a 200 response.
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetEventsOkBody {
        0 => required event: Event,
    }
}

/// 200: success.
#[derive(Debug, Clone, PartialEq)]
pub struct GetEventsOk {
    pub payload: GetEventsOkBody,
}

impl GetEventsOk {
    /// Run tuple and event validation on the payload.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.payload.validate()
    }

    /// The decoded event, if the body carried one.
    pub fn event(&self) -> Option<&Event> {
        self.payload.event.as_ref()
    }
}

impl fmt::Display for GetEventsOk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][200] getEventsNetworkIdStreamNameOK {:?}", OPERATION, self.payload)
    }
}

/// Any status other than 200.
#[derive(Debug, Clone, PartialEq)]
pub struct GetEventsDefault {
    code: u16,
    pub payload: ErrorPayload,
}

impl GetEventsDefault {
    pub fn new(code: u16, payload: ErrorPayload) -> Self {
        Self { code, payload }
    }

    /// Status code of the response.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.code / 100 == 2
    }
}

impl fmt::Display for GetEventsDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] GetEventsNetworkIDStreamName default: {}",
            OPERATION, self.code, self.payload
        )
    }
}

impl std::error::Error for GetEventsDefault {}

/// Outcome of reading an events response.
#[derive(Debug, Clone, PartialEq)]
pub enum GetEventsResponse {
    Ok(GetEventsOk),
    /// A non-200 status in the 2xx range.
    Default(GetEventsDefault),
}

impl GetEventsResponse {
    pub fn code(&self) -> u16 {
        match self {
            GetEventsResponse::Ok(_) => 200,
            GetEventsResponse::Default(default) => default.code(),
        }
    }
}
