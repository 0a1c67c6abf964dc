//! Ordered stroke sequences.
//!
//! A [`Shortcut`] is immutable. Editing a binding replaces the shortcut instance,
//! so anything still holding the old one (an in-flight chord, for example) keeps
//! seeing a consistent sequence.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::format::{DefaultStrokeFormatter, StrokeFormatter};
use crate::stroke::{KeyStroke, MouseStroke, Stroke};

#[cfg(test)]
mod tests;

/// Error returned when a shortcut cannot be built from the given strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidShortcut {
	#[error("invalid argument: a shortcut needs at least one stroke")]
	Empty,
}

/// Which input devices a shortcut's strokes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutKind {
	Keyboard,
	Mouse,
	Mixed,
}

/// A non-empty, ordered sequence of strokes forming one gesture.
///
/// The first stroke is the primary stroke; any further strokes turn the
/// shortcut into a chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Stroke>", into = "Vec<Stroke>")]
pub struct Shortcut {
	strokes: SmallVec<[Stroke; 2]>,
	kind: ShortcutKind,
}

#[allow(clippy::len_without_is_empty)]
impl Shortcut {
	/// Builds a shortcut from a stroke sequence.
	///
	/// # Errors
	///
	/// Returns [`InvalidShortcut::Empty`] if `strokes` yields nothing.
	pub fn new(strokes: impl IntoIterator<Item = Stroke>) -> Result<Self, InvalidShortcut> {
		let strokes: SmallVec<[Stroke; 2]> = strokes.into_iter().collect();
		let kind = classify(&strokes).ok_or(InvalidShortcut::Empty)?;
		Ok(Self { strokes, kind })
	}

	/// Builds a keyboard-only shortcut.
	pub fn keyboard(strokes: impl IntoIterator<Item = KeyStroke>) -> Result<Self, InvalidShortcut> {
		Self::new(strokes.into_iter().map(Stroke::Key))
	}

	/// Builds a mouse-only shortcut.
	pub fn mouse(strokes: impl IntoIterator<Item = MouseStroke>) -> Result<Self, InvalidShortcut> {
		Self::new(strokes.into_iter().map(Stroke::Mouse))
	}

	/// Single-stroke shortcut. Infallible since the sequence has exactly one element.
	pub fn single(stroke: impl Into<Stroke>) -> Self {
		let stroke = stroke.into();
		let kind = if stroke.is_key() { ShortcutKind::Keyboard } else { ShortcutKind::Mouse };
		let mut strokes = SmallVec::new();
		strokes.push(stroke);
		Self { strokes, kind }
	}

	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn primary_stroke(&self) -> &Stroke {
		&self.strokes[0]
	}

	/// All strokes after the primary one. Empty for simple shortcuts.
	pub fn secondary_strokes(&self) -> &[Stroke] {
		&self.strokes[1..]
	}

	/// Returns the stroke at `index`, if any.
	pub fn stroke_at(&self, index: usize) -> Option<&Stroke> {
		self.strokes.get(index)
	}

	/// Number of strokes; always at least one.
	pub fn len(&self) -> usize {
		self.strokes.len()
	}

	pub fn is_chord(&self) -> bool {
		self.strokes.len() > 1
	}

	pub fn kind(&self) -> ShortcutKind {
		self.kind
	}

	pub fn has_keyboard_strokes(&self) -> bool {
		matches!(self.kind, ShortcutKind::Keyboard | ShortcutKind::Mixed)
	}

	pub fn has_mouse_strokes(&self) -> bool {
		matches!(self.kind, ShortcutKind::Mouse | ShortcutKind::Mixed)
	}
}

fn classify(strokes: &[Stroke]) -> Option<ShortcutKind> {
	let first = strokes.first()?;
	let mut has_key = first.is_key();
	let mut has_mouse = first.is_mouse();
	for stroke in &strokes[1..] {
		has_key |= stroke.is_key();
		has_mouse |= stroke.is_mouse();
	}
	Some(match (has_key, has_mouse) {
		(true, true) => ShortcutKind::Mixed,
		(true, false) => ShortcutKind::Keyboard,
		_ => ShortcutKind::Mouse,
	})
}

impl TryFrom<Vec<Stroke>> for Shortcut {
	type Error = InvalidShortcut;

	fn try_from(strokes: Vec<Stroke>) -> Result<Self, Self::Error> {
		Self::new(strokes)
	}
}

impl From<Shortcut> for Vec<Stroke> {
	fn from(shortcut: Shortcut) -> Self {
		shortcut.strokes.into_vec()
	}
}

impl fmt::Display for Shortcut {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&DefaultStrokeFormatter.format_shortcut(self))
	}
}
