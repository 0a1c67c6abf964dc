//! Candidate precedence policy.

use std::cmp::Ordering;

/// Comparable precedence tuple for one compiled binding.
///
/// Ordering is ascending by priority: the `Less` candidate wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateRank {
	/// Set at resolve time when the binding applies only because it is
	/// global, not because its group contains the focused context.
	pub global_only: bool,
	/// Depth of the owning group; the root is 0.
	pub depth: usize,
	/// Pre-order position of the owning group in the tree.
	pub group_order: usize,
	/// Declaration position of the binding inside its group.
	pub ordinal: usize,
}

/// Compare two candidates and return ordering where `Less` wins.
///
/// Policy:
/// * Bindings whose group contains the context before global-only ones.
/// * Deeper groups first (most specific context).
/// * Equal depth: earlier group in tree pre-order first.
/// * Same group: declaration order.
pub(crate) fn compare_candidates(a: CandidateRank, b: CandidateRank) -> Ordering {
	a.global_only
		.cmp(&b.global_only)
		.then_with(|| b.depth.cmp(&a.depth))
		.then_with(|| a.group_order.cmp(&b.group_order))
		.then_with(|| a.ordinal.cmp(&b.ordinal))
}

impl Ord for CandidateRank {
	fn cmp(&self, other: &Self) -> Ordering {
		compare_candidates(*self, *other)
	}
}

impl PartialOrd for CandidateRank {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
