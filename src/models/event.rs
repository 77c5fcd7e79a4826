//! Event record streamed from a network's event log.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tuple_codec::{Validate, ValidationErrors};

/// A single event as returned by the events API.
///
/// Every field is required, but all of them default on decode so that
/// validation can report each missing field instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Type of the event (e.g. "session_created").
    #[serde(default)]
    pub event_type: String,

    /// Hardware ID of the gateway that emitted the event.
    #[serde(default)]
    pub hardware_id: String,

    /// Name of the stream the event was published on.
    #[serde(default)]
    pub stream_name: String,

    /// Event tag, typically the subscriber or session it concerns.
    #[serde(default)]
    pub tag: String,

    /// When the event was recorded.
    #[serde(default)]
    pub timestamp: String,

    /// Event-specific payload, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Validate for Event {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_non_empty("event_type", &self.event_type);
        errors.require_non_empty("hardware_id", &self.hardware_id);
        errors.require_non_empty("stream_name", &self.stream_name);
        errors.require_non_empty("tag", &self.tag);
        errors.require_non_empty("timestamp", &self.timestamp);
        errors.require_present("value", self.value.is_some());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Event {
        serde_json::from_value(json!({
            "event_type": "session_created",
            "hardware_id": "hw-01",
            "stream_name": "sessiond",
            "tag": "IMSI001010000000001",
            "timestamp": "2020-04-08T16:55:22Z",
            "value": {"apn": "internet"}
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_event_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_object_reports_every_field() {
        let event: Event = serde_json::from_str("{}").unwrap();
        let errors = event.validate().unwrap_err();

        let paths: Vec<String> = errors.iter().map(|e| e.dotted_path()).collect();
        assert_eq!(
            paths,
            vec!["event_type", "hardware_id", "stream_name", "tag", "timestamp", "value"]
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut event = sample();
        event.tag.clear();

        let errors = event.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].dotted_path(), "tag");
    }
}
