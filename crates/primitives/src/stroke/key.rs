use serde::{Deserialize, Serialize};

use super::Modifiers;

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyStroke {
	/// Platform key code as reported by the host toolkit.
	pub key_code: u32,
	/// Modifiers held during the stroke.
	#[serde(default)]
	pub modifiers: Modifiers,
	/// Whether this is the release phase of the key.
	#[serde(default)]
	pub is_release: bool,
}

impl KeyStroke {
	pub const fn new(key_code: u32, modifiers: Modifiers, is_release: bool) -> Self {
		Self {
			key_code,
			modifiers,
			is_release,
		}
	}

	/// Key-down stroke.
	pub const fn press(key_code: u32, modifiers: Modifiers) -> Self {
		Self::new(key_code, modifiers, false)
	}

	/// Key-up stroke.
	pub const fn release(key_code: u32, modifiers: Modifiers) -> Self {
		Self::new(key_code, modifiers, true)
	}

	/// Compares key code and modifiers, ignoring the press/release phase.
	pub fn equals_ignoring_release(&self, other: &Self) -> bool {
		self.key_code == other.key_code && self.modifiers == other.modifiers
	}

	/// Returns the same key in the opposite phase.
	pub const fn flipped(self) -> Self {
		Self {
			is_release: !self.is_release,
			..self
		}
	}
}
