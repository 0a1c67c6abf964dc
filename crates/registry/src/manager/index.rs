use std::sync::Arc;

use rustc_hash::FxHashMap;
use strokemap_primitives::{Shortcut, Stroke};

use super::precedence::{CandidateRank, compare_candidates};
use crate::group::CommandId;
use crate::path::GroupPath;

/// One compiled binding, as returned by candidate resolution.
#[derive(Debug, Clone)]
pub struct Candidate {
	pub shortcut: Arc<Shortcut>,
	pub command_id: CommandId,
	pub group: Arc<GroupPath>,
	pub is_global: bool,
	pub rank: CandidateRank,
}

impl Candidate {
	/// Whether this binding applies while `context` is focused.
	pub fn applies_to(&self, context: &GroupPath) -> bool {
		self.is_global || self.group.is_ancestor_of_or_equal(context)
	}
}

/// First-stroke lookup index compiled from a group tree.
///
/// Candidate lists are stored in precedence order, so filtering preserves the
/// tie-break order without re-sorting.
#[derive(Debug, Default)]
pub struct StrokeIndex {
	pub(super) by_stroke: FxHashMap<Stroke, Vec<Candidate>>,
	pub(super) by_command: FxHashMap<CommandId, Vec<Candidate>>,
	pub(super) binding_count: usize,
}

impl StrokeIndex {
	/// Candidates whose primary stroke equals `first_stroke` and which apply
	/// to `context` in precedence order.
	///
	/// Global bindings from groups outside `context` are marked
	/// [`CandidateRank::global_only`] and rank after every in-scope binding.
	pub fn candidates(&self, first_stroke: &Stroke, context: &GroupPath) -> Vec<Candidate> {
		let Some(list) = self.by_stroke.get(first_stroke) else {
			return Vec::new();
		};
		let mut out: Vec<Candidate> = list
			.iter()
			.filter_map(|c| {
				if c.group.is_ancestor_of_or_equal(context) {
					Some(c.clone())
				} else if c.is_global {
					let mut c = c.clone();
					c.rank.global_only = true;
					Some(c)
				} else {
					None
				}
			})
			.collect();
		out.sort_by(|a, b| compare_candidates(a.rank, b.rank));
		out
	}

	/// Every binding for `command_id` regardless of context, in precedence order.
	pub fn for_command(&self, command_id: &CommandId) -> &[Candidate] {
		self.by_command.get(command_id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Number of distinct primary strokes.
	pub fn primary_stroke_count(&self) -> usize {
		self.by_stroke.len()
	}

	pub fn binding_count(&self) -> usize {
		self.binding_count
	}
}
