//! Tree-to-index compilation.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use strokemap_primitives::Shortcut;
use tracing::{debug, warn};

use super::index::{Candidate, StrokeIndex};
use super::precedence::{CandidateRank, compare_candidates};
use crate::error::{DuplicateBinding, ShortcutError};
use crate::group::ShortcutGroup;

/// Compiles `root` into a [`StrokeIndex`] in one pass over all bindings.
///
/// Structural problems are collected for the whole tree before failing, so a
/// rejected load reports every duplicate at once.
pub(crate) fn compile(root: &ShortcutGroup) -> Result<StrokeIndex, ShortcutError> {
	let mut compiler = Compiler::default();
	compiler.visit(root);

	if let Some(err) = compiler.name_error {
		warn!(error = %err, "shortcut tree rejected");
		return Err(err);
	}

	if !compiler.duplicates.is_empty() {
		let samples: Vec<_> = compiler.duplicates.iter().take(5).map(|d| format!("{} in {}", d.shortcut, d.group)).collect();
		warn!(count = compiler.duplicates.len(), ?samples, "duplicate shortcut bindings");
		return Err(ShortcutError::DuplicateShortcut {
			duplicates: compiler.duplicates,
		});
	}

	let mut index = compiler.index;
	for list in index.by_stroke.values_mut().chain(index.by_command.values_mut()) {
		list.sort_by(|a, b| compare_candidates(a.rank, b.rank));
	}

	debug!(
		bindings = index.binding_count,
		primary_strokes = index.by_stroke.len(),
		"shortcut index rebuilt"
	);
	Ok(index)
}

#[derive(Default)]
struct Compiler {
	index: StrokeIndex,
	group_order: usize,
	duplicates: Vec<DuplicateBinding>,
	name_error: Option<ShortcutError>,
}

impl Compiler {
	fn visit(&mut self, group: &ShortcutGroup) {
		let group_order = self.group_order;
		self.group_order += 1;
		let path = Arc::new(group.path().clone());

		let mut seen: FxHashMap<&Shortcut, usize> = FxHashMap::default();
		for (ordinal, binding) in group.bindings().iter().enumerate() {
			if let Some(&first) = seen.get(&*binding.shortcut) {
				self.duplicates.push(DuplicateBinding {
					group: group.path().clone(),
					shortcut: Arc::clone(&binding.shortcut),
					kept_command: group.bindings()[first].command_id.clone(),
					duplicate_command: binding.command_id.clone(),
				});
				continue;
			}
			seen.insert(&*binding.shortcut, ordinal);

			let candidate = Candidate {
				shortcut: Arc::clone(&binding.shortcut),
				command_id: binding.command_id.clone(),
				group: Arc::clone(&path),
				is_global: binding.is_global,
				rank: CandidateRank {
					global_only: false,
					depth: path.depth(),
					group_order,
					ordinal,
				},
			};
			self.index
				.by_command
				.entry(candidate.command_id.clone())
				.or_default()
				.push(candidate.clone());
			self.index
				.by_stroke
				.entry(*candidate.shortcut.primary_stroke())
				.or_default()
				.push(candidate);
			self.index.binding_count += 1;
		}

		let mut names: FxHashSet<&str> = FxHashSet::default();
		for child in group.children() {
			if self.name_error.is_none() {
				if child.name().is_empty() {
					self.name_error = Some(ShortcutError::InvalidName { name: String::new() });
				} else if !names.insert(child.name()) {
					self.name_error = Some(ShortcutError::DuplicateName {
						parent: group.path().clone(),
						name: child.name().to_string(),
					});
				}
			}
			self.visit(child);
		}
	}
}
