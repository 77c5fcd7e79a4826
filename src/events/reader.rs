//! Status-code dispatch for events responses.

use crate::models::ErrorPayload;
use crate::runtime::{ClientResponse, ConsumeError, Consumer, ResponseReader};

use super::{GetEventsDefault, GetEventsOk, GetEventsOkBody, GetEventsResponse, OPERATION};

/// Read errors
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read events response: {0}")]
    Consume(#[from] ConsumeError),

    #[error("events response has unsupported content type {0:?}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Unexpected(GetEventsDefault),
}

impl ReadError {
    /// Status code of an unexpected response.
    pub fn code(&self) -> Option<u16> {
        match self {
            ReadError::Unexpected(default) => Some(default.code()),
            ReadError::Consume(_) | ReadError::UnsupportedMediaType(_) => None,
        }
    }
}

/// Reader for `GET /events/{network_id}/{stream_name}` responses.
///
/// - 200: the body is a tuple and becomes [`GetEventsResponse::Ok`]
/// - other 2xx: the body is an error payload, returned as
///   [`GetEventsResponse::Default`]
/// - anything else: the error payload is returned as
///   [`ReadError::Unexpected`]
///
/// A `Content-Type` header, when present, must name JSON. Payloads are not
/// validated here; call `validate` on the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetEventsReader;

impl ResponseReader for GetEventsReader {
    type Output = GetEventsResponse;
    type Error = ReadError;

    fn read_response<R, C>(&self, response: &R, consumer: &C) -> Result<GetEventsResponse, ReadError>
    where
        R: ClientResponse + ?Sized,
        C: Consumer,
    {
        let code = response.code();
        log::debug!(
            "reading {} response: {} {}",
            OPERATION,
            code,
            response.message()
        );

        if let Some(content_type) = response.header("Content-Type") {
            if !is_json_media_type(content_type) {
                return Err(ReadError::UnsupportedMediaType(content_type.to_string()));
            }
        }

        if code == 200 {
            let payload: GetEventsOkBody = consumer.consume_tuple(response.body())?;
            return Ok(GetEventsResponse::Ok(GetEventsOk { payload }));
        }

        let payload: ErrorPayload = consumer.consume(response.body())?;
        let result = GetEventsDefault::new(code, payload);
        if result.is_success() {
            Ok(GetEventsResponse::Default(result))
        } else {
            Err(ReadError::Unexpected(result))
        }
    }
}

/// `application/json` or any `+json` suffix, parameters ignored.
fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{JsonConsumer, RawResponse};

    fn read(code: u16, body: &str) -> Result<GetEventsResponse, ReadError> {
        GetEventsReader.read_response(&RawResponse::new(code, body), &JsonConsumer::new())
    }

    #[test]
    fn test_ok_with_empty_body() {
        let response = read(200, "").unwrap();
        match response {
            GetEventsResponse::Ok(ok) => assert!(ok.event().is_none()),
            other => panic!("expected ok, got {:?}", other),
        }
    }

    #[test]
    fn test_accepted_is_default_success() {
        let response = read(202, r#"{"message": "accepted"}"#).unwrap();
        assert_eq!(response.code(), 202);
        assert!(matches!(response, GetEventsResponse::Default(_)));
    }

    #[test]
    fn test_server_error_is_unexpected() {
        let err = read(500, r#"{"message": "internal"}"#).unwrap_err();
        assert_eq!(err.code(), Some(500));
        assert!(err.to_string().contains("[500]"));
        assert!(err.to_string().contains("internal"));
    }

    #[test]
    fn test_json_content_types_accepted() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("Application/JSON; charset=utf-8"));
        assert!(is_json_media_type("application/problem+json"));
        assert!(!is_json_media_type("text/html"));
        assert!(!is_json_media_type(""));
    }

    #[test]
    fn test_html_body_is_refused_before_decoding() {
        let response = RawResponse::new(200, "<html></html>")
            .with_message("OK")
            .with_header("content-type", "text/html; charset=utf-8");

        let err = GetEventsReader
            .read_response(&response, &JsonConsumer::new())
            .unwrap_err();
        assert!(matches!(
            &err,
            ReadError::UnsupportedMediaType(content_type) if content_type == "text/html; charset=utf-8"
        ));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_declared_json_is_read() {
        let response = RawResponse::new(404, r#"{"message": "gone"}"#)
            .with_message("Not Found")
            .with_header("Content-Type", "application/json; charset=utf-8");

        let err = GetEventsReader
            .read_response(&response, &JsonConsumer::new())
            .unwrap_err();
        assert_eq!(err.code(), Some(404));
    }

    #[test]
    fn test_bad_ok_body_is_consume_error() {
        let err = read(200, r#"{"p0": {}}"#).unwrap_err();
        assert!(matches!(err, ReadError::Consume(ConsumeError::Tuple(_))));
        assert_eq!(err.code(), None);
    }
}
