use std::sync::Arc;

use strokemap_primitives::{KeyStroke, Modifiers, Shortcut, Stroke};

use super::ShortcutManager;
use crate::error::ShortcutError;
use crate::group::ShortcutGroup;
use crate::path::GroupPath;

fn stroke(code: u8) -> Stroke {
	Stroke::Key(KeyStroke::press(code as u32, Modifiers::CTRL))
}

fn tree_with(command: &str) -> ShortcutGroup {
	let mut root = ShortcutGroup::root();
	root.add_binding(Shortcut::single(stroke(b'A')), command, false).unwrap();
	root
}

/// Must keep serving the previously loaded tree when a load is rejected.
///
/// * Enforced in: `ShortcutManager::load_tree`, `compiler::compile`
/// * Failure symptom: a keymap with a duplicate binding leaves the editor with
///   no shortcuts, or with half of the new keymap active.
#[cfg_attr(test, test)]
pub(crate) fn test_rejected_load_keeps_previous_tree() {
	let manager = ShortcutManager::with_root(tree_with("old")).unwrap();
	let before = manager.root();

	let mut bad = tree_with("new");
	bad.add_binding(Shortcut::single(stroke(b'B')), "b1", false).unwrap();
	// Bypass add_binding's own check the way a deserialized tree would.
	let bad: ShortcutGroup = serde_json::from_value({
		let mut value = serde_json::to_value(&bad).unwrap();
		let dup = value["bindings"][1].clone();
		value["bindings"].as_array_mut().unwrap().push(dup);
		value
	})
	.unwrap();

	let err = manager.load_tree(bad).unwrap_err();
	assert!(matches!(err, ShortcutError::DuplicateShortcut { ref duplicates } if duplicates.len() == 1));
	assert!(Arc::ptr_eq(&before, &manager.root()));

	let candidates = manager.resolve_candidates(&stroke(b'A'), &GroupPath::root());
	assert_eq!(candidates.len(), 1);
	assert_eq!(candidates[0].command_id.as_str(), "old");
}

/// Must rebuild the index from the published tree after invalidation.
///
/// * Enforced in: `ShortcutManager::ensure_cache_built`
/// * Failure symptom: strokes resolve against bindings from an older tree.
#[cfg_attr(test, test)]
pub(crate) fn test_index_tracks_published_tree() {
	let manager = ShortcutManager::with_root(tree_with("first")).unwrap();
	let first = manager.ensure_cache_built().unwrap();
	assert!(Arc::ptr_eq(&first, &manager.ensure_cache_built().unwrap()));

	manager.invalidate_cache();
	let rebuilt = manager.ensure_cache_built().unwrap();
	assert!(!Arc::ptr_eq(&first, &rebuilt));
	assert_eq!(rebuilt.binding_count(), 1);

	manager.load_tree(tree_with("second")).unwrap();
	let candidates = manager.resolve_candidates(&stroke(b'A'), &GroupPath::root());
	assert_eq!(candidates[0].command_id.as_str(), "second");
}

/// Must reject a failed edit without publishing any part of it.
///
/// * Enforced in: `ShortcutManager::edit`
/// * Failure symptom: a configuration UI error leaves a half-applied edit live.
#[cfg_attr(test, test)]
pub(crate) fn test_failed_edit_publishes_nothing() {
	let manager = ShortcutManager::with_root(tree_with("keep")).unwrap();
	let before = manager.root();

	let result = manager.edit(|root| {
		root.add_child_group("scratch")?;
		root.add_binding(Shortcut::single(stroke(b'A')), "clash", false)
	});

	assert!(matches!(result, Err(ShortcutError::DuplicateShortcut { .. })));
	assert!(Arc::ptr_eq(&before, &manager.root()));
	assert!(manager.root().child("scratch").is_none());
}
