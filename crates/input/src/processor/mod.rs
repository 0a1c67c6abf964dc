//! Per-surface stroke processor.
//!
//! # State machine
//!
//! * `Idle`: no chords in flight. A single-stroke match activates at once; a
//!   chord primary moves to `AwaitingSecondary`.
//! * `AwaitingSecondary`: every pending chord is tested against each stroke.
//!   A completion, a stroke no chord accepts, or `cancel_all` returns to `Idle`.
//!
//! Completing any shortcut drops every other pending chord. There is no chord
//! timeout: a pending chord waits until a stroke completes or cancels it.

use std::sync::Arc;
use std::time::Instant;

use strokemap_primitives::{DefaultStrokeFormatter, Stroke, StrokeFormatter};
use strokemap_registry::{Candidate, CommandId, GroupPath, ShortcutManager};
use tracing::{debug, trace, warn};

use crate::config::ProcessorOptions;
use crate::dispatch::{Activation, ActivationDispatcher};
use crate::observer::{CancelReason, ProcessorObserver};
use crate::usage::{ShortcutUsage, StrokeMatch};


/// Result of feeding one stroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
	/// Idle and no shortcut starts with this stroke.
	NoMatch,
	/// One or more chords are waiting for further strokes.
	ChordPending,
	/// A shortcut completed and its command was dispatched.
	Activated(CommandId),
	/// Every pending chord rejected this stroke; back to idle.
	ChordCancelled,
}

/// Observable processor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
	Idle,
	AwaitingSecondary,
}

/// The most recently consumed stroke.
#[derive(Debug, Clone)]
pub struct LastInput {
	pub stroke: Stroke,
	pub context: GroupPath,
	pub at: Instant,
}

/// Consumes strokes one at a time and activates completed shortcuts.
///
/// Not shared: each input surface owns one, so chord state never leaks
/// between windows. Strokes must be delivered in order from one thread, but
/// the processor is `Send` and may be built elsewhere and moved there.
pub struct ShortcutInputProcessor {
	manager: Arc<ShortcutManager>,
	options: ProcessorOptions,
	dispatcher: Box<dyn ActivationDispatcher + Send>,
	formatter: Box<dyn StrokeFormatter + Send>,
	observers: Vec<Box<dyn ProcessorObserver + Send>>,
	usages: Vec<ShortcutUsage>,
	last_input: Option<LastInput>,
}

impl ShortcutInputProcessor {
	pub fn new(manager: Arc<ShortcutManager>, dispatcher: impl ActivationDispatcher + Send + 'static) -> Self {
		Self {
			manager,
			options: ProcessorOptions::default(),
			dispatcher: Box::new(dispatcher),
			formatter: Box::new(DefaultStrokeFormatter),
			observers: Vec::new(),
			usages: Vec::new(),
			last_input: None,
		}
	}

	pub fn with_options(mut self, options: ProcessorOptions) -> Self {
		self.options = options;
		self
	}

	/// Replaces the formatter used for log output.
	pub fn with_formatter(mut self, formatter: impl StrokeFormatter + Send + 'static) -> Self {
		self.formatter = Box::new(formatter);
		self
	}

	pub fn with_observer(mut self, observer: impl ProcessorObserver + Send + 'static) -> Self {
		self.add_observer(observer);
		self
	}

	pub fn add_observer(&mut self, observer: impl ProcessorObserver + Send + 'static) {
		self.observers.push(Box::new(observer));
	}

	pub fn options(&self) -> &ProcessorOptions {
		&self.options
	}

	pub fn manager(&self) -> &Arc<ShortcutManager> {
		&self.manager
	}

	pub fn state(&self) -> ProcessorState {
		if self.usages.is_empty() {
			ProcessorState::Idle
		} else {
			ProcessorState::AwaitingSecondary
		}
	}

	/// In-flight chords in precedence order.
	pub fn pending(&self) -> impl ExactSizeIterator<Item = &ShortcutUsage> {
		self.usages.iter()
	}

	pub fn last_input(&self) -> Option<&LastInput> {
		self.last_input.as_ref()
	}

	/// Feeds one stroke with the focused context path as a string.
	///
	/// An unparsable context path is logged and treated as the root context,
	/// so only root-level and global bindings can match.
	pub fn on_stroke(&mut self, stroke: Stroke, context_path: &str) -> ProcessingOutcome {
		let context = GroupPath::parse(context_path).unwrap_or_else(|err| {
			warn!(error = %err, "invalid context path; using root context");
			GroupPath::root()
		});
		self.on_stroke_in(stroke, &context)
	}

	/// Feeds one stroke with an already parsed context path.
	pub fn on_stroke_in(&mut self, stroke: Stroke, context: &GroupPath) -> ProcessingOutcome {
		trace!(
			stroke = %self.formatter.format_stroke(&stroke),
			%context,
			pending = self.usages.len(),
			"processing stroke"
		);
		self.last_input = Some(LastInput {
			stroke,
			context: context.clone(),
			at: Instant::now(),
		});

		if self.usages.is_empty() {
			self.process_primary(stroke, context)
		} else {
			self.process_secondary(stroke, context)
		}
	}

	/// Drops every pending chord without activating anything.
	pub fn cancel_all(&mut self) {
		if self.usages.is_empty() {
			return;
		}
		debug!(count = self.usages.len(), "cancelling pending chords");
		for usage in std::mem::take(&mut self.usages) {
			self.notify_cancelled(&usage, CancelReason::Explicit);
		}
	}

	fn process_primary(&mut self, stroke: Stroke, context: &GroupPath) -> ProcessingOutcome {
		let mut single = None;
		let mut chords = Vec::new();
		for candidate in self.manager.resolve_candidates(&stroke, context) {
			if candidate.shortcut.is_chord() {
				chords.push(ShortcutUsage::begin(candidate));
			} else if single.is_none() {
				single = Some(candidate);
			}
		}

		// A single-stroke match wins outright; chords sharing its primary
		// stroke never become pending.
		if let Some(winner) = single {
			return self.activate(&winner, context);
		}

		if chords.is_empty() {
			trace!(stroke = %self.formatter.format_stroke(&stroke), "no shortcut for stroke");
			if self.options.report_no_match {
				for observer in &mut self.observers {
					observer.on_no_match(&stroke, context);
				}
			}
			return ProcessingOutcome::NoMatch;
		}

		for usage in &chords {
			debug!(
				command = %usage.command_id(),
				chord = %self.formatter.format_shortcut(usage.shortcut()),
				"chord started"
			);
			for observer in &mut self.observers {
				observer.on_chord_created(usage);
			}
		}
		self.usages = chords;
		ProcessingOutcome::ChordPending
	}

	fn process_secondary(&mut self, stroke: Stroke, context: &GroupPath) -> ProcessingOutcome {
		let mut completed: Vec<ShortcutUsage> = Vec::new();
		let mut pending = Vec::with_capacity(self.usages.len());

		for mut usage in std::mem::take(&mut self.usages) {
			match usage.classify(&stroke, self.options.ignore_phase_flips) {
				StrokeMatch::Advance => {
					usage.advance(stroke);
					if usage.is_completed() {
						completed.push(usage);
					} else {
						for observer in &mut self.observers {
							observer.on_chord_advanced(&usage);
						}
						pending.push(usage);
					}
				}
				StrokeMatch::Hold => pending.push(usage),
				StrokeMatch::Mismatch => {
					debug!(
						command = %usage.command_id(),
						stroke = %self.formatter.format_stroke(&stroke),
						"no such next stroke; chord cancelled"
					);
					self.notify_cancelled(&usage, CancelReason::NoSuchNextStroke(stroke));
				}
			}
		}

		let winner = completed
			.iter()
			.enumerate()
			.min_by_key(|(_, usage)| usage.candidate().rank)
			.map(|(idx, _)| idx);
		if let Some(idx) = winner {
			let winner = completed.swap_remove(idx);
			for usage in completed.iter().chain(&pending) {
				self.notify_cancelled(usage, CancelReason::Superseded);
			}
			return self.activate(winner.candidate(), context);
		}

		self.usages = pending;
		if self.usages.is_empty() {
			ProcessingOutcome::ChordCancelled
		} else {
			ProcessingOutcome::ChordPending
		}
	}

	fn activate(&mut self, candidate: &Candidate, context: &GroupPath) -> ProcessingOutcome {
		let activation = Activation {
			command_id: candidate.command_id.clone(),
			shortcut: Arc::clone(&candidate.shortcut),
			group: Arc::clone(&candidate.group),
			context: context.clone(),
		};
		debug!(
			command = %activation.command_id,
			shortcut = %self.formatter.format_shortcut(&activation.shortcut),
			group = %activation.group,
			"shortcut activated"
		);
		for observer in &mut self.observers {
			observer.on_activated(&activation);
		}
		self.dispatcher.dispatch(activation);
		ProcessingOutcome::Activated(candidate.command_id.clone())
	}

	fn notify_cancelled(&mut self, usage: &ShortcutUsage, reason: CancelReason) {
		for observer in &mut self.observers {
			observer.on_chord_cancelled(usage, reason);
		}
	}
}
