//! Discrete input events that shortcuts are built from.
//!
//! A [`Stroke`] is either a key or a mouse event, never a blend of both. The two
//! variants follow different matching rules: mouse strokes compare click counts,
//! key strokes do not have one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{DefaultStrokeFormatter, StrokeFormatter};

mod key;
mod modifiers;
mod mouse;

pub use key::KeyStroke;
pub use modifiers::Modifiers;
pub use mouse::MouseStroke;

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stroke {
	Key(KeyStroke),
	Mouse(MouseStroke),
}

impl Stroke {
	/// Exact equality on every field. Strokes of different variants never match.
	pub fn matches(&self, other: &Self) -> bool {
		self == other
	}

	/// Equality ignoring the press/release phase (and, for mouse strokes, the
	/// click count).
	pub fn matches_ignoring_phase(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Key(a), Self::Key(b)) => a.equals_ignoring_release(b),
			(Self::Mouse(a), Self::Mouse(b)) => a.equals_ignoring_phase(b),
			_ => false,
		}
	}

	/// Returns true if `self` is the same physical key or button as `other`
	/// in the opposite phase.
	pub fn is_phase_flip_of(&self, other: &Self) -> bool {
		self.is_release() != other.is_release() && self.matches_ignoring_phase(other)
	}

	pub fn is_release(&self) -> bool {
		match self {
			Self::Key(k) => k.is_release,
			Self::Mouse(m) => m.is_release,
		}
	}

	pub fn modifiers(&self) -> Modifiers {
		match self {
			Self::Key(k) => k.modifiers,
			Self::Mouse(m) => m.modifiers,
		}
	}

	pub fn is_key(&self) -> bool {
		matches!(self, Self::Key(_))
	}

	pub fn is_mouse(&self) -> bool {
		matches!(self, Self::Mouse(_))
	}
}

impl From<KeyStroke> for Stroke {
	fn from(stroke: KeyStroke) -> Self {
		Self::Key(stroke)
	}
}

impl From<MouseStroke> for Stroke {
	fn from(stroke: MouseStroke) -> Self {
		Self::Mouse(stroke)
	}
}

impl fmt::Display for Stroke {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&DefaultStrokeFormatter.format_stroke(self))
	}
}
