//! Modifier key set (Ctrl, Alt, Shift, Meta).

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
	/// Modifier keys held while a stroke happened.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
	#[serde(transparent)]
	pub struct Modifiers: u8 {
		/// Shift key.
		const SHIFT = 1 << 0;
		/// Control key.
		const CTRL = 1 << 1;
		/// Alt / Option key.
		const ALT = 1 << 2;
		/// Meta / Super / Command key.
		const META = 1 << 3;
	}
}

impl Modifiers {
	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		self | Self::CTRL
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		self | Self::ALT
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		self | Self::SHIFT
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		self | Self::META
	}
}
