//! Shared shortcut manager.
//!
//! Owns the group tree and a derived first-stroke index. Both are published as
//! immutable snapshots: writers build a new tree and index off to the side and
//! swap them in only when compilation succeeds, so readers always see a
//! complete index and a rejected load keeps the previous tree working.
//!
//! # Invariants
//!
//! - The published index is always compiled from the published tree (see
//!   `invariants::test_index_tracks_published_tree`).
//! - A failed load or edit leaves the published tree untouched (see
//!   `invariants::test_rejected_load_keeps_previous_tree`).

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::Mutex;
use strokemap_primitives::{Shortcut, Stroke};
use tracing::{debug, trace, warn};

use crate::error::ShortcutError;
use crate::group::{CommandId, ShortcutBinding, ShortcutGroup};
use crate::path::GroupPath;

mod compiler;
mod index;
#[cfg(test)]
mod invariants;
mod precedence;

pub use index::{Candidate, StrokeIndex};
pub use precedence::CandidateRank;

struct CacheEntry {
	tree: Arc<ShortcutGroup>,
	index: Arc<StrokeIndex>,
}

/// Process-wide owner of the shortcut tree.
///
/// Reads (`resolve_candidates`) are lock-free and may run from any number of
/// threads. Mutations are serialized against each other by a writer lock.
pub struct ShortcutManager {
	tree: ArcSwap<ShortcutGroup>,
	cache: ArcSwapOption<CacheEntry>,
	writer: Mutex<()>,
}

impl Default for ShortcutManager {
	fn default() -> Self {
		Self::new()
	}
}

impl ShortcutManager {
	/// Creates a manager with an empty root group.
	pub fn new() -> Self {
		let tree = Arc::new(ShortcutGroup::root());
		let cache = CacheEntry {
			tree: Arc::clone(&tree),
			index: Arc::new(StrokeIndex::default()),
		};
		Self {
			tree: ArcSwap::new(tree),
			cache: ArcSwapOption::from_pointee(cache),
			writer: Mutex::new(()),
		}
	}

	/// Creates a manager and loads `root` into it.
	pub fn with_root(root: ShortcutGroup) -> Result<Self, ShortcutError> {
		let manager = Self::new();
		manager.load_tree(root)?;
		Ok(manager)
	}

	/// Current tree snapshot.
	pub fn root(&self) -> Arc<ShortcutGroup> {
		self.tree.load_full()
	}

	/// Replaces the whole tree.
	///
	/// The index is rebuilt eagerly. On failure the previous tree stays
	/// published and the aggregated error is returned.
	pub fn load_tree(&self, mut root: ShortcutGroup) -> Result<(), ShortcutError> {
		let _guard = self.writer.lock();
		root.rebase(GroupPath::root());
		let index = compiler::compile(&root).inspect_err(|err| warn!(error = %err, "shortcut load rejected; keeping previous tree"))?;
		debug!(bindings = index.binding_count(), "shortcut tree loaded");
		self.publish(Arc::new(root), Arc::new(index));
		Ok(())
	}

	/// Applies `edit` to a copy of the current tree and publishes the result.
	///
	/// Nothing is published if `edit` returns an error or the edited tree
	/// fails to compile.
	pub fn edit<R>(&self, edit: impl FnOnce(&mut ShortcutGroup) -> Result<R, ShortcutError>) -> Result<R, ShortcutError> {
		let _guard = self.writer.lock();
		let mut tree = ShortcutGroup::clone(&self.tree.load());
		let out = edit(&mut tree)?;
		let index = compiler::compile(&tree).inspect_err(|err| warn!(error = %err, "shortcut edit rejected"))?;
		self.publish(Arc::new(tree), Arc::new(index));
		Ok(out)
	}

	/// Adds an empty group `name` below `parent` and returns its path.
	pub fn add_group(&self, parent: &str, name: &str) -> Result<GroupPath, ShortcutError> {
		let parent = GroupPath::parse(parent)?;
		self.edit(|root| {
			let group = root.find_group_mut(&parent).ok_or_else(|| ShortcutError::GroupNotFound(parent.clone()))?;
			Ok(group.add_child_group(name)?.path().clone())
		})
	}

	/// Binds `shortcut` to `command_id` in the group at `group`.
	pub fn add_binding(&self, group: &str, shortcut: impl Into<Arc<Shortcut>>, command_id: impl Into<CommandId>, is_global: bool) -> Result<(), ShortcutError> {
		let path = GroupPath::parse(group)?;
		let shortcut = shortcut.into();
		let command_id = command_id.into();
		self.edit(|root| group_mut(root, &path)?.add_binding(shortcut, command_id, is_global))
	}

	/// Removes the binding for `shortcut` from the group at `group`.
	pub fn remove_binding(&self, group: &str, shortcut: &Shortcut) -> Result<Option<ShortcutBinding>, ShortcutError> {
		let path = GroupPath::parse(group)?;
		self.edit(|root| Ok(group_mut(root, &path)?.remove_binding(shortcut)))
	}

	/// Swaps the shortcut of an existing binding in the group at `group`.
	pub fn replace_binding(&self, group: &str, old: &Shortcut, new: impl Into<Arc<Shortcut>>) -> Result<(), ShortcutError> {
		let path = GroupPath::parse(group)?;
		let new = new.into();
		self.edit(|root| group_mut(root, &path)?.replace_binding(old, new))
	}

	/// Drops the cached index. The next read rebuilds it.
	pub fn invalidate_cache(&self) {
		self.cache.store(None);
	}

	/// Returns the index for the current tree, rebuilding it if it was
	/// invalidated or is stale.
	pub fn ensure_cache_built(&self) -> Result<Arc<StrokeIndex>, ShortcutError> {
		let tree = self.tree.load_full();
		if let Some(entry) = self.cache.load_full()
			&& Arc::ptr_eq(&entry.tree, &tree)
		{
			return Ok(Arc::clone(&entry.index));
		}

		let index = Arc::new(compiler::compile(&tree)?);
		self.cache.store(Some(Arc::new(CacheEntry {
			tree,
			index: Arc::clone(&index),
		})));
		Ok(index)
	}

	/// Candidates whose primary stroke is `first_stroke` and whose group
	/// contains `context` (or which are global), deepest group first.
	pub fn resolve_candidates(&self, first_stroke: &Stroke, context: &GroupPath) -> Vec<Candidate> {
		let index = match self.ensure_cache_built() {
			Ok(index) => index,
			Err(err) => {
				warn!(error = %err, "shortcut index unavailable");
				return Vec::new();
			}
		};
		let candidates = index.candidates(first_stroke, context);
		trace!(stroke = %first_stroke, %context, count = candidates.len(), "resolved shortcut candidates");
		candidates
	}

	/// All bindings for `command_id` in precedence order, ignoring context.
	pub fn bindings_for_command(&self, command_id: &CommandId) -> Vec<Candidate> {
		self.ensure_cache_built()
			.map(|index| index.for_command(command_id).to_vec())
			.unwrap_or_default()
	}

	fn publish(&self, tree: Arc<ShortcutGroup>, index: Arc<StrokeIndex>) {
		self.tree.store(Arc::clone(&tree));
		self.cache.store(Some(Arc::new(CacheEntry { tree, index })));
	}
}

fn group_mut<'a>(root: &'a mut ShortcutGroup, path: &GroupPath) -> Result<&'a mut ShortcutGroup, ShortcutError> {
	root.find_group_mut(path).ok_or_else(|| ShortcutError::GroupNotFound(path.clone()))
}
