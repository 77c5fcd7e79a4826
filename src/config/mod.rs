//! Configuration
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. User config (`$XDG_CONFIG_HOME/obsidian/events.toml`)
//! 3. CLI flags

mod effective;
mod merge;
mod settings;

pub use effective::{default_user_config_path, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};
pub use settings::{DecodeSettings, OutputSettings, Settings, ValidateSettings, MAX_BODY_BYTES_LIMIT};
