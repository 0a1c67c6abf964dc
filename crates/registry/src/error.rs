//! Structural configuration errors.
//!
//! None of these arise while processing strokes; they are raised by tree
//! mutation and index rebuilds only.

use std::sync::Arc;

use strokemap_primitives::Shortcut;

use crate::group::CommandId;
use crate::path::GroupPath;

/// Malformed group path string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	#[error("invalid group path {path:?}: empty segment at byte {position}")]
	EmptySegment { path: String, position: usize },
	#[error("invalid group path {path:?}: trailing separator")]
	TrailingSeparator { path: String },
	#[error("invalid group path {path:?}: dangling escape")]
	DanglingEscape { path: String },
	#[error("invalid group path {path:?}: unknown escape '\\{found}'")]
	UnknownEscape { path: String, found: char },
}

/// The same stroke sequence bound twice within one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateBinding {
	pub group: GroupPath,
	pub shortcut: Arc<Shortcut>,
	pub kept_command: CommandId,
	pub duplicate_command: CommandId,
}

/// Errors raised by group tree mutation and manager loads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
	/// A sibling group already uses this name.
	#[error("duplicate group name {name:?} under {parent}")]
	DuplicateName { parent: GroupPath, name: String },

	/// One or more (group, stroke sequence) pairs are bound twice.
	#[error("duplicate shortcut bindings: {}", summarize(.duplicates))]
	DuplicateShortcut { duplicates: Vec<DuplicateBinding> },

	#[error(transparent)]
	InvalidPath(#[from] PathError),

	/// Group names must be non-empty.
	#[error("invalid group name {name:?}")]
	InvalidName { name: String },

	#[error("group not found: {0}")]
	GroupNotFound(GroupPath),

	#[error("no binding for '{shortcut}' in {group}")]
	BindingNotFound { group: GroupPath, shortcut: Arc<Shortcut> },
}

fn summarize(duplicates: &[DuplicateBinding]) -> String {
	let mut out = format!("{} found", duplicates.len());
	for dup in duplicates.iter().take(3) {
		out.push_str(&format!(
			"; '{}' in {} ({} vs {})",
			dup.shortcut, dup.group, dup.kept_command, dup.duplicate_command
		));
	}
	if duplicates.len() > 3 {
		out.push_str("; ...");
	}
	out
}
