//! End-to-end chord behavior: a shared manager, a fresh processor per case.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use strokemap_input::{ProcessingOutcome, ProcessorState, QueuedDispatcher, ShortcutInputProcessor};
use strokemap_primitives::{KeyStroke, Modifiers, MouseStroke, Shortcut, Stroke};
use strokemap_registry::{CommandId, ShortcutError, ShortcutGroup, ShortcutManager};

fn down(code: u8) -> Stroke {
	Stroke::Key(KeyStroke::press(code as u32, Modifiers::empty()))
}

fn up(code: u8) -> Stroke {
	Stroke::Key(KeyStroke::release(code as u32, Modifiers::empty()))
}

fn keys(codes: &[u8]) -> Shortcut {
	Shortcut::new(codes.iter().map(|&c| down(c))).unwrap()
}

fn fresh_processor(manager: &Arc<ShortcutManager>) -> (ShortcutInputProcessor, QueuedDispatcher) {
	let queue = QueuedDispatcher::new();
	(ShortcutInputProcessor::new(Arc::clone(manager), queue.clone()), queue)
}

fn activated(id: &str) -> ProcessingOutcome {
	ProcessingOutcome::Activated(CommandId::from(id))
}

fn arb_stroke() -> impl Strategy<Value = Stroke> {
	let modifiers = (0u8..16).prop_map(Modifiers::from_bits_truncate);
	prop_oneof![
		(b'A'..=b'Z', modifiers.clone(), any::<bool>())
			.prop_map(|(code, mods, release)| Stroke::Key(KeyStroke::new(code as u32, mods, release))),
		(1u32..4, modifiers, 1u32..3).prop_map(|(button, mods, clicks)| Stroke::Mouse(MouseStroke::click(button, mods, clicks))),
	]
}

proptest! {
	#[test]
	fn typed_sequence_activates_on_last_stroke(
		strokes in prop::collection::vec(arb_stroke(), 1..5),
		depth in 0usize..3,
	) {
		let mut root = ShortcutGroup::root();
		let mut group = &mut root;
		for level in 0..depth {
			group = group.add_child_group(format!("g{level}")).unwrap();
		}
		let context = group.path().to_string();
		group.add_binding(Shortcut::new(strokes.clone()).unwrap(), "typed", false).unwrap();
		let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
		let (mut processor, queue) = fresh_processor(&manager);

		let (last, leading) = strokes.split_last().unwrap();
		for stroke in leading {
			prop_assert_eq!(processor.on_stroke(*stroke, &context), ProcessingOutcome::ChordPending);
		}
		prop_assert_eq!(processor.on_stroke(*last, &context), activated("typed"));
		prop_assert_eq!(processor.state(), ProcessorState::Idle);
		prop_assert_eq!(queue.len(), 1);
	}
}

#[test]
fn single_stroke_activates_without_pending() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"S"), "save", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
	let (mut processor, _) = fresh_processor(&manager);

	assert_eq!(processor.on_stroke(down(b'S'), "/"), activated("save"));
	assert_eq!(processor.state(), ProcessorState::Idle);
}

#[test]
fn unbound_stroke_is_no_match() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"S"), "save", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
	let (mut processor, queue) = fresh_processor(&manager);

	assert_eq!(processor.on_stroke(down(b'T'), "/"), ProcessingOutcome::NoMatch);
	assert_eq!(processor.state(), ProcessorState::Idle);
	assert!(queue.is_empty());
}

#[rstest]
#[case::length_two_completes("KC", activated("comment"))]
#[case::length_three_waits("KU", ProcessingOutcome::ChordPending)]
fn diverging_chords_resolve_to_one(#[case] typed: &str, #[case] expected: ProcessingOutcome) {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"KC"), "comment", false).unwrap();
	root.add_binding(keys(b"KUX"), "uncomment", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
	let (mut processor, _) = fresh_processor(&manager);

	assert_eq!(processor.on_stroke(down(typed.as_bytes()[0]), "/"), ProcessingOutcome::ChordPending);
	assert_eq!(processor.pending().len(), 2);
	assert_eq!(processor.on_stroke(down(typed.as_bytes()[1]), "/"), expected);
	assert!(processor.pending().len() <= 1);
}

#[test]
fn released_first_key_does_not_cancel_chord() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"AB"), "ab", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());

	let (mut processor, _) = fresh_processor(&manager);
	assert_eq!(processor.on_stroke(down(b'A'), "/"), ProcessingOutcome::ChordPending);
	assert_eq!(processor.on_stroke(up(b'A'), "/"), ProcessingOutcome::ChordPending);
	assert_eq!(processor.on_stroke(down(b'B'), "/"), activated("ab"));

	let (mut processor, queue) = fresh_processor(&manager);
	processor.on_stroke(down(b'A'), "/");
	assert_eq!(processor.on_stroke(down(b'C'), "/"), ProcessingOutcome::ChordCancelled);
	assert_eq!(processor.state(), ProcessorState::Idle);
	assert!(queue.is_empty());
}

#[test]
fn duplicate_load_keeps_previous_keymap() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"AB"), "ab", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());

	let mut bad = ShortcutGroup::root();
	bad.add_binding(keys(b"Q"), "first", false).unwrap();
	let bad: ShortcutGroup = serde_json::from_value({
		let mut value = serde_json::to_value(&bad).unwrap();
		let dup = value["bindings"][0].clone();
		value["bindings"].as_array_mut().unwrap().push(dup);
		value
	})
	.unwrap();
	let err = manager.load_tree(bad).unwrap_err();
	assert!(matches!(err, ShortcutError::DuplicateShortcut { .. }), "{err}");

	let (mut processor, _) = fresh_processor(&manager);
	processor.on_stroke(down(b'A'), "/");
	assert_eq!(processor.on_stroke(down(b'B'), "/"), activated("ab"));
	assert_eq!(processor.on_stroke(down(b'Q'), "/"), ProcessingOutcome::NoMatch);
}

#[rstest]
#[case::sibling("/editor/resources", false, None)]
#[case::same_group("/editor/timeline", false, Some("split"))]
#[case::descendant("/editor/timeline/clip", false, Some("split"))]
#[case::global_from_sibling("/editor/resources", true, Some("split"))]
#[case::global_from_root("/", true, Some("split"))]
fn bindings_are_scoped_to_their_group(#[case] context: &str, #[case] is_global: bool, #[case] expected: Option<&str>) {
	let manager = Arc::new(ShortcutManager::new());
	manager.add_group("/", "editor").unwrap();
	manager.add_group("/editor", "timeline").unwrap();
	manager.add_group("/editor", "resources").unwrap();
	manager.add_binding("/editor/timeline", keys(b"S"), "split", is_global).unwrap();
	let (mut processor, _) = fresh_processor(&manager);

	let outcome = processor.on_stroke(down(b'S'), context);
	assert_eq!(outcome, expected.map_or(ProcessingOutcome::NoMatch, activated));
}

#[test]
fn cancel_all_drops_the_rest_of_the_chord() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"ABC"), "abc", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
	let (mut processor, queue) = fresh_processor(&manager);

	processor.on_stroke(down(b'A'), "/");
	processor.on_stroke(down(b'B'), "/");
	processor.cancel_all();
	assert_eq!(processor.state(), ProcessorState::Idle);
	assert_eq!(processor.on_stroke(down(b'C'), "/"), ProcessingOutcome::NoMatch);
	assert!(queue.is_empty());
}

#[test]
fn processors_do_not_share_chord_state() {
	let mut root = ShortcutGroup::root();
	root.add_binding(keys(b"AB"), "ab", false).unwrap();
	root.add_binding(keys(b"B"), "b", false).unwrap();
	let manager = Arc::new(ShortcutManager::with_root(root).unwrap());
	let (mut first, _) = fresh_processor(&manager);
	let (mut second, _) = fresh_processor(&manager);

	first.on_stroke(down(b'A'), "/");
	assert_eq!(second.on_stroke(down(b'B'), "/"), activated("b"));
	assert_eq!(first.on_stroke(down(b'B'), "/"), activated("ab"));
}
