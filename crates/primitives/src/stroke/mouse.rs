use serde::{Deserialize, Serialize};

use super::Modifiers;

/// A mouse button click or release.
///
/// `click_count` distinguishes single from double (or triple) clicks and takes
/// part in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseStroke {
	/// Host toolkit button index.
	pub button: u32,
	#[serde(default)]
	pub modifiers: Modifiers,
	#[serde(default = "default_click_count")]
	pub click_count: u32,
	#[serde(default)]
	pub is_release: bool,
}

fn default_click_count() -> u32 {
	1
}

impl MouseStroke {
	pub const fn new(button: u32, modifiers: Modifiers, click_count: u32, is_release: bool) -> Self {
		Self {
			button,
			modifiers,
			click_count,
			is_release,
		}
	}

	/// Button-down stroke with the given click count.
	pub const fn click(button: u32, modifiers: Modifiers, click_count: u32) -> Self {
		Self::new(button, modifiers, click_count, false)
	}

	/// Button-up stroke.
	pub const fn release(button: u32, modifiers: Modifiers) -> Self {
		Self::new(button, modifiers, 1, true)
	}

	/// Compares button and modifiers only; click count and phase are ignored.
	pub fn equals_ignoring_phase(&self, other: &Self) -> bool {
		self.button == other.button && self.modifiers == other.modifiers
	}
}
