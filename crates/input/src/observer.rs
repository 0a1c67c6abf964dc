//! Diagnostic hooks for "waiting for next input" style feedback.
//!
//! Observers are informational. The [`ProcessingOutcome`](crate::ProcessingOutcome)
//! returned by each stroke is the authoritative result.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use strokemap_primitives::{Shortcut, Stroke};
use strokemap_registry::{CommandId, GroupPath};

use crate::dispatch::Activation;
use crate::usage::ShortcutUsage;

/// Why an in-flight chord was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
	/// The stroke did not continue the chord.
	NoSuchNextStroke(Stroke),
	/// Another shortcut completed on the same stroke.
	Superseded,
	/// `cancel_all` was called (focus loss, for example).
	Explicit,
}

/// Receives processor diagnostics. Every method defaults to a no-op.
pub trait ProcessorObserver {
	/// A stroke arrived while idle and no shortcut starts with it.
	fn on_no_match(&mut self, _stroke: &Stroke, _context: &GroupPath) {}

	fn on_chord_created(&mut self, _usage: &ShortcutUsage) {}

	/// A pending chord consumed a stroke and still needs more.
	fn on_chord_advanced(&mut self, _usage: &ShortcutUsage) {}

	fn on_chord_cancelled(&mut self, _usage: &ShortcutUsage, _reason: CancelReason) {}

	fn on_activated(&mut self, _activation: &Activation) {}
}

/// Owned record of one diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	NoMatch {
		stroke: Stroke,
		context: GroupPath,
	},
	ChordCreated {
		command_id: CommandId,
		shortcut: Arc<Shortcut>,
	},
	ChordAdvanced {
		command_id: CommandId,
		remaining: usize,
	},
	ChordCancelled {
		command_id: CommandId,
		reason: CancelReason,
	},
	Activated {
		command_id: CommandId,
	},
}

/// Observer that queues [`Diagnostic`]s for the host to poll.
///
/// Clones share the same queue: keep one handle, install the other.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
	events: Arc<Mutex<VecDeque<Diagnostic>>>,
}

impl DiagnosticLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes and returns all queued events, oldest first.
	pub fn drain(&self) -> Vec<Diagnostic> {
		self.events.lock().drain(..).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.events.lock().is_empty()
	}

	fn push(&self, event: Diagnostic) {
		self.events.lock().push_back(event);
	}
}

impl ProcessorObserver for DiagnosticLog {
	fn on_no_match(&mut self, stroke: &Stroke, context: &GroupPath) {
		self.push(Diagnostic::NoMatch {
			stroke: *stroke,
			context: context.clone(),
		});
	}

	fn on_chord_created(&mut self, usage: &ShortcutUsage) {
		self.push(Diagnostic::ChordCreated {
			command_id: usage.command_id().clone(),
			shortcut: Arc::clone(usage.shortcut()),
		});
	}

	fn on_chord_advanced(&mut self, usage: &ShortcutUsage) {
		self.push(Diagnostic::ChordAdvanced {
			command_id: usage.command_id().clone(),
			remaining: usage.remaining().len(),
		});
	}

	fn on_chord_cancelled(&mut self, usage: &ShortcutUsage, reason: CancelReason) {
		self.push(Diagnostic::ChordCancelled {
			command_id: usage.command_id().clone(),
			reason,
		});
	}

	fn on_activated(&mut self, activation: &Activation) {
		self.push(Diagnostic::Activated {
			command_id: activation.command_id.clone(),
		});
	}
}
