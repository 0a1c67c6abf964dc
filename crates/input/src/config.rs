//! Processor configuration.
//!
//! ```toml
//! [processor]
//! report_no_match = false
//! ignore_phase_flips = true
//! ```

use serde::{Deserialize, Serialize};

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Behavior knobs for a [`ShortcutInputProcessor`](crate::ShortcutInputProcessor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorOptions {
	/// Emit the no-match diagnostic for unbound strokes while idle.
	pub report_no_match: bool,
	/// Treat a phase flip of the held (or expected) key as neither advancing
	/// nor cancelling a pending chord. When off, such strokes cancel it.
	pub ignore_phase_flips: bool,
}

impl Default for ProcessorOptions {
	fn default() -> Self {
		Self {
			report_no_match: true,
			ignore_phase_flips: true,
		}
	}
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	pub processor: ProcessorOptions,
}

impl EngineConfig {
	/// Parses configuration from TOML. Missing keys take their defaults.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}
