//! Effective configuration with provenance
//!
//! Records the merged configuration together with where each layer came
//! from, so `obsidian-events config` can show exactly what is in force.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::merge::merge_layers;
use super::settings::{Settings, MAX_BODY_BYTES_LIMIT};

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    User,
    Cli,
}

/// A contributing layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged configuration plus provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,

    #[serde(skip)]
    settings: Settings,
}

impl EffectiveConfig {
    /// Build from the built-in defaults, an optional user file and CLI
    /// overrides. A user path that does not exist is skipped.
    pub fn build(user_config_path: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, ConfigError> {
        let mut layers = vec![Settings::builtin_layer()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = user_config_path {
            if path.exists() {
                let (value, digest) = Self::load_toml_file(path)?;
                log::debug!("loaded config layer {} (sha256 {})", path.display(), digest);
                layers.push(value);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::User,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            } else {
                log::debug!("no config file at {}", path.display());
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let settings: Settings = serde_json::from_value(merged.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Self::validate_settings(&settings)?;

        Ok(Self {
            created_at: Utc::now(),
            config: merged,
            sources,
            settings,
        })
    }

    /// Typed view of the merged configuration.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;
        let table: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(table), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::toml_to_json(value)))
                    .collect(),
            ),
        }
    }

    fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
        let max = settings.decode.max_body_bytes;
        if max == 0 || max > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "decode.max_body_bytes must be in (0, {}]",
                MAX_BODY_BYTES_LIMIT
            )));
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/obsidian/events.toml`, falling back to
/// `$HOME/.config/obsidian/events.toml`.
pub fn default_user_config_path() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("obsidian").join("events.toml"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_with_defaults_only() {
        let config = EffectiveConfig::build(None, None).unwrap();

        assert_eq!(config.config["decode"]["strict_arity"], false);
        assert_eq!(config.config["decode"]["max_body_bytes"], 8 * 1024 * 1024);
        assert_eq!(config.settings(), &Settings::default());
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_cli_override_wins() {
        let cli = serde_json::json!({"decode": {"strict_arity": true}});
        let config = EffectiveConfig::build(None, Some(cli)).unwrap();

        assert!(config.settings().decode.strict_arity);
        assert_eq!(config.sources.last().map(|s| s.origin), Some(ConfigOrigin::Cli));
    }

    #[test]
    fn test_load_toml_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[output]").unwrap();
        writeln!(temp, "pretty = true").unwrap();
        writeln!(temp, "[decode]").unwrap();
        writeln!(temp, "max_body_bytes = 4096").unwrap();

        let config = EffectiveConfig::build(Some(temp.path()), None).unwrap();

        assert!(config.settings().output.pretty);
        assert_eq!(config.settings().decode.max_body_bytes, 4096);
        assert!(!config.settings().decode.strict_arity);

        let user = &config.sources[1];
        assert_eq!(user.origin, ConfigOrigin::User);
        assert_eq!(user.digest.as_ref().map(|d| d.len()), Some(64));
    }

    #[test]
    fn test_missing_user_file_is_skipped() {
        let config = EffectiveConfig::build(Some(Path::new("/nonexistent/events.toml")), None).unwrap();
        assert_eq!(config.sources.len(), 1);
    }

    #[test]
    fn test_zero_max_body_rejected() {
        let cli = serde_json::json!({"decode": {"max_body_bytes": 0}});
        let err = EffectiveConfig::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("decode.max_body_bytes"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let cli = serde_json::json!({"validate": {"enabled": "yes"}});
        assert!(matches!(
            EffectiveConfig::build(None, Some(cli)),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[decode").unwrap();

        assert!(matches!(
            EffectiveConfig::build(Some(temp.path()), None),
            Err(ConfigError::ParseError(_))
        ));
    }
}
