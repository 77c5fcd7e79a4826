//! Typed settings.

use serde::{Deserialize, Serialize};
use tuple_codec::DecodeOptions;

/// Largest accepted `decode.max_body_bytes` (64 MiB).
pub const MAX_BODY_BYTES_LIMIT: u64 = 64 * 1024 * 1024;

/// Fully merged settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub decode: DecodeSettings,
    pub validate: ValidateSettings,
    pub output: OutputSettings,
}

/// `[decode]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSettings {
    /// Reject tuple arrays longer than the declared arity.
    pub strict_arity: bool,
    /// Bodies larger than this are refused before decoding.
    pub max_body_bytes: u64,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            strict_arity: false,
            max_body_bytes: 8 * 1024 * 1024, // 8 MiB
        }
    }
}

/// `[validate]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateSettings {
    pub enabled: bool,
}

impl Default for ValidateSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Settings {
    /// Built-in defaults as a mergeable layer.
    pub fn builtin_layer() -> serde_json::Value {
        serde_json::json!({
            "decode": {
                "strict_arity": false,
                "max_body_bytes": 8 * 1024 * 1024
            },
            "validate": {
                "enabled": true
            },
            "output": {
                "pretty": false
            }
        })
    }

    /// Codec options derived from `[decode]`.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_arity: self.decode.strict_arity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_layer_matches_defaults() {
        let from_layer: Settings = serde_json::from_value(Settings::builtin_layer()).unwrap();
        assert_eq!(from_layer, Settings::default());
    }

    #[test]
    fn test_partial_sections_fill_in() {
        let settings: Settings =
            serde_json::from_value(serde_json::json!({"decode": {"strict_arity": true}})).unwrap();

        assert!(settings.decode.strict_arity);
        assert_eq!(settings.decode.max_body_bytes, 8 * 1024 * 1024);
        assert!(settings.validate.enabled);
        assert!(settings.decode_options().strict_arity);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Settings, _> =
            serde_json::from_value(serde_json::json!({"decode": {"strict": true}}));
        assert!(result.is_err());
    }
}
