//! Progress of one in-flight chord.

use std::sync::Arc;

use strokemap_primitives::{Shortcut, Stroke};
use strokemap_registry::{Candidate, CommandId, GroupPath};

/// How a stroke relates to a usage's next expected stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrokeMatch {
	/// Exactly the next stroke.
	Advance,
	/// The held key or button changed phase; neither advance nor cancel.
	Hold,
	Mismatch,
}

/// Tracks how far one chord has been typed.
///
/// Created when the primary stroke of a multi-stroke shortcut arrives and
/// discarded once it completes or is cancelled. Holds its own reference to the
/// shortcut instance, so replacing the binding mid-chord does not disturb it.
#[derive(Debug, Clone)]
pub struct ShortcutUsage {
	candidate: Candidate,
	cursor: usize,
	previous: Stroke,
}

impl ShortcutUsage {
	/// Starts a usage positioned after the primary stroke.
	pub(crate) fn begin(candidate: Candidate) -> Self {
		let previous = *candidate.shortcut.primary_stroke();
		Self {
			candidate,
			cursor: 1,
			previous,
		}
	}

	pub fn shortcut(&self) -> &Arc<Shortcut> {
		&self.candidate.shortcut
	}

	pub fn command_id(&self) -> &CommandId {
		&self.candidate.command_id
	}

	/// Path of the group that owns the binding.
	pub fn group(&self) -> &GroupPath {
		&self.candidate.group
	}

	pub fn candidate(&self) -> &Candidate {
		&self.candidate
	}

	/// The stroke that would advance this usage; `None` once completed.
	pub fn next_stroke(&self) -> Option<&Stroke> {
		self.candidate.shortcut.stroke_at(self.cursor)
	}

	/// The last stroke this usage consumed.
	pub fn previous_stroke(&self) -> &Stroke {
		&self.previous
	}

	/// Strokes still to be typed.
	pub fn remaining(&self) -> &[Stroke] {
		&self.candidate.shortcut.strokes()[self.cursor..]
	}

	/// `(consumed, total)` stroke counts.
	pub fn progress(&self) -> (usize, usize) {
		(self.cursor, self.candidate.shortcut.len())
	}

	pub fn is_completed(&self) -> bool {
		self.cursor >= self.candidate.shortcut.len()
	}

	pub(crate) fn classify(&self, stroke: &Stroke, ignore_phase_flips: bool) -> StrokeMatch {
		let Some(expected) = self.next_stroke() else {
			return StrokeMatch::Mismatch;
		};
		if stroke.matches(expected) {
			StrokeMatch::Advance
		} else if ignore_phase_flips && self.is_held_phase_flip(stroke, expected) {
			StrokeMatch::Hold
		} else {
			StrokeMatch::Mismatch
		}
	}

	/// A press or release of any key or button already consumed by this chord
	/// (it may still be held), or of the one it expects next.
	fn is_held_phase_flip(&self, stroke: &Stroke, expected: &Stroke) -> bool {
		stroke.is_phase_flip_of(expected)
			|| self.candidate.shortcut.strokes()[..self.cursor]
				.iter()
				.any(|consumed| stroke.is_phase_flip_of(consumed))
	}

	pub(crate) fn advance(&mut self, stroke: Stroke) {
		self.previous = stroke;
		self.cursor += 1;
	}
}
