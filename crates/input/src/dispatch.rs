//! Activation dispatch.
//!
//! The processor hands each completed shortcut to an [`ActivationDispatcher`].
//! Whether the command then succeeds is the command system's concern; nothing
//! here feeds back into matching.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use strokemap_primitives::Shortcut;
use strokemap_registry::{CommandId, GroupPath};
use tracing::trace;

/// A completed shortcut ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
	pub command_id: CommandId,
	pub shortcut: Arc<Shortcut>,
	/// Group that owns the winning binding.
	pub group: Arc<GroupPath>,
	/// Context path that was focused when the last stroke arrived.
	pub context: GroupPath,
}

/// Receives activations from a processor.
///
/// Called synchronously from inside stroke processing. Implementations that
/// need to touch the shortcut tree or feed more strokes should defer, e.g. via
/// [`QueuedDispatcher`].
pub trait ActivationDispatcher {
	fn dispatch(&mut self, activation: Activation);
}

impl<F> ActivationDispatcher for F
where
	F: FnMut(Activation),
{
	fn dispatch(&mut self, activation: Activation) {
		self(activation)
	}
}

/// Command-execution sink.
pub trait CommandSink {
	/// Executes `command_id` in `context`. Returns whether it was handled.
	fn execute(&self, command_id: &CommandId, context: &GroupPath) -> bool;
}

/// Executes activations inline through a [`CommandSink`].
#[derive(Debug)]
pub struct ImmediateDispatcher<S> {
	sink: S,
}

impl<S: CommandSink> ImmediateDispatcher<S> {
	pub fn new(sink: S) -> Self {
		Self { sink }
	}

	pub fn sink(&self) -> &S {
		&self.sink
	}
}

impl<S: CommandSink> ActivationDispatcher for ImmediateDispatcher<S> {
	fn dispatch(&mut self, activation: Activation) {
		let handled = self.sink.execute(&activation.command_id, &activation.context);
		trace!(command = %activation.command_id, handled, "command executed");
	}
}

/// Queues activations for the host to run after stroke processing returns.
///
/// Clones share one queue.
#[derive(Debug, Clone, Default)]
pub struct QueuedDispatcher {
	queue: Arc<Mutex<VecDeque<Activation>>>,
}

impl QueuedDispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	/// Takes the oldest queued activation.
	pub fn pop(&self) -> Option<Activation> {
		self.queue.lock().pop_front()
	}

	/// Takes all queued activations, oldest first.
	pub fn drain(&self) -> Vec<Activation> {
		self.queue.lock().drain(..).collect()
	}

	pub fn len(&self) -> usize {
		self.queue.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.lock().is_empty()
	}
}

impl ActivationDispatcher for QueuedDispatcher {
	fn dispatch(&mut self, activation: Activation) {
		self.queue.lock().push_back(activation);
	}
}
