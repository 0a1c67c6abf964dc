use proptest::prelude::*;

use super::*;
use crate::stroke::Modifiers;

fn key(code: u32) -> KeyStroke {
	KeyStroke::press(code, Modifiers::empty())
}

#[test]
fn empty_sequence_is_rejected() {
	assert_eq!(Shortcut::new(Vec::new()), Err(InvalidShortcut::Empty));
	assert_eq!(Shortcut::keyboard(Vec::new()), Err(InvalidShortcut::Empty));
}

#[test]
fn primary_and_secondary_strokes() {
	let shortcut = Shortcut::keyboard([key(1), key(2), key(3)]).unwrap();

	assert_eq!(shortcut.primary_stroke(), &Stroke::Key(key(1)));
	assert_eq!(shortcut.secondary_strokes(), &[Stroke::Key(key(2)), Stroke::Key(key(3))]);
	assert!(shortcut.is_chord());
	assert_eq!(shortcut.len(), 3);
}

#[test]
fn single_stroke_is_not_a_chord() {
	let shortcut = Shortcut::single(key(7));
	assert!(!shortcut.is_chord());
	assert!(shortcut.secondary_strokes().is_empty());
	assert_eq!(shortcut.kind(), ShortcutKind::Keyboard);
}

#[test]
fn kind_reflects_devices() {
	let mouse = Shortcut::mouse([MouseStroke::click(0, Modifiers::empty(), 2)]).unwrap();
	assert_eq!(mouse.kind(), ShortcutKind::Mouse);
	assert!(mouse.has_mouse_strokes());
	assert!(!mouse.has_keyboard_strokes());

	let mixed = Shortcut::new([Stroke::Key(key(1)), Stroke::Mouse(MouseStroke::click(0, Modifiers::CTRL, 1))]).unwrap();
	assert_eq!(mixed.kind(), ShortcutKind::Mixed);
	assert!(mixed.has_mouse_strokes() && mixed.has_keyboard_strokes());
}

#[test]
fn deserializing_empty_sequence_fails() {
	let err = serde_json::from_str::<Shortcut>("[]");
	assert!(err.is_err());

	let ok: Shortcut = serde_json::from_str(r#"[{"type":"key","key_code":1},{"type":"key","key_code":2}]"#).unwrap();
	assert_eq!(ok, Shortcut::keyboard([key(1), key(2)]).unwrap());
}

proptest! {
	#[test]
	fn kind_matches_stroke_devices(devices in proptest::collection::vec(any::<bool>(), 1..8)) {
		let strokes: Vec<Stroke> = devices
			.iter()
			.enumerate()
			.map(|(i, is_key)| if *is_key {
				Stroke::Key(key(i as u32))
			} else {
				Stroke::Mouse(MouseStroke::click(i as u32, Modifiers::empty(), 1))
			})
			.collect();
		let shortcut = Shortcut::new(strokes.clone()).unwrap();

		prop_assert_eq!(shortcut.strokes(), strokes.as_slice());
		prop_assert_eq!(shortcut.has_keyboard_strokes(), devices.iter().any(|k| *k));
		prop_assert_eq!(shortcut.has_mouse_strokes(), devices.iter().any(|k| !*k));
	}
}
