//! Stroke-to-text rendering.
//!
//! Hosts that want toolkit-specific key names (`Enter`, `PgDn`, localized labels)
//! implement [`StrokeFormatter`] and hand it to the engine. The default formatter
//! only knows printable ASCII key codes.

use std::borrow::Cow;

use crate::shortcut::Shortcut;
use crate::stroke::{KeyStroke, Modifiers, MouseStroke, Stroke};

/// Renders strokes for logs, diagnostics and configuration UIs.
pub trait StrokeFormatter {
	/// Name of a key code without modifiers.
	fn key_name(&self, key_code: u32) -> Cow<'static, str>;

	/// Name of a mouse button without modifiers.
	fn button_name(&self, button: u32) -> Cow<'static, str> {
		Cow::Owned(format!("Mouse{button}"))
	}

	fn format_key(&self, stroke: &KeyStroke) -> String {
		let mut out = modifier_prefix(stroke.modifiers);
		out.push_str(&self.key_name(stroke.key_code));
		if stroke.is_release {
			out.push_str(" (release)");
		}
		out
	}

	fn format_mouse(&self, stroke: &MouseStroke) -> String {
		let mut out = modifier_prefix(stroke.modifiers);
		out.push_str(&self.button_name(stroke.button));
		if stroke.click_count > 1 {
			out.push_str(&format!(" x{}", stroke.click_count));
		}
		if stroke.is_release {
			out.push_str(" (release)");
		}
		out
	}

	fn format_stroke(&self, stroke: &Stroke) -> String {
		match stroke {
			Stroke::Key(k) => self.format_key(k),
			Stroke::Mouse(m) => self.format_mouse(m),
		}
	}

	/// Strokes joined with `", "`.
	fn format_shortcut(&self, shortcut: &Shortcut) -> String {
		shortcut.strokes().iter().map(|s| self.format_stroke(s)).collect::<Vec<_>>().join(", ")
	}
}

/// Formatter that renders printable ASCII key codes as their character.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrokeFormatter;

impl StrokeFormatter for DefaultStrokeFormatter {
	fn key_name(&self, key_code: u32) -> Cow<'static, str> {
		match char::from_u32(key_code) {
			Some(' ') => Cow::Borrowed("Space"),
			Some(c) if c.is_ascii_graphic() => Cow::Owned(c.to_ascii_uppercase().to_string()),
			_ => Cow::Owned(format!("Key#{key_code}")),
		}
	}
}

fn modifier_prefix(modifiers: Modifiers) -> String {
	let mut out = String::new();
	for (flag, label) in [
		(Modifiers::CTRL, "Ctrl+"),
		(Modifiers::ALT, "Alt+"),
		(Modifiers::SHIFT, "Shift+"),
		(Modifiers::META, "Meta+"),
	] {
		if modifiers.contains(flag) {
			out.push_str(label);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_with_modifiers() {
		let stroke = KeyStroke::press(b'k' as u32, Modifiers::CTRL | Modifiers::SHIFT);
		assert_eq!(DefaultStrokeFormatter.format_key(&stroke), "Ctrl+Shift+K");
	}

	#[test]
	fn release_and_unknown_key() {
		let stroke = KeyStroke::release(0x1000, Modifiers::empty());
		assert_eq!(DefaultStrokeFormatter.format_key(&stroke), "Key#4096 (release)");
	}

	#[test]
	fn mouse_double_click() {
		let stroke = MouseStroke::click(1, Modifiers::ALT, 2);
		assert_eq!(DefaultStrokeFormatter.format_mouse(&stroke), "Alt+Mouse1 x2");
	}

	#[test]
	fn chord_display() {
		let shortcut = Shortcut::keyboard([
			KeyStroke::press(b'K' as u32, Modifiers::CTRL),
			KeyStroke::press(b'C' as u32, Modifiers::CTRL),
		])
		.unwrap();
		assert_eq!(shortcut.to_string(), "Ctrl+K, Ctrl+C");
	}

	#[test]
	fn custom_key_names() {
		struct Named;
		impl StrokeFormatter for Named {
			fn key_name(&self, key_code: u32) -> Cow<'static, str> {
				match key_code {
					13 => Cow::Borrowed("Enter"),
					_ => DefaultStrokeFormatter.key_name(key_code),
				}
			}
		}

		let stroke = Stroke::Key(KeyStroke::press(13, Modifiers::META));
		assert_eq!(Named.format_stroke(&stroke), "Meta+Enter");
	}
}
