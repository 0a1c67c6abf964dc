//! Value types for input shortcuts: strokes, modifier sets, and stroke sequences.

/// Human-readable rendering of strokes and shortcuts.
pub mod format;
/// Ordered stroke sequences bound to commands.
pub mod shortcut;
/// Single discrete key and mouse input events.
pub mod stroke;

pub use format::{DefaultStrokeFormatter, StrokeFormatter};
pub use shortcut::{InvalidShortcut, Shortcut, ShortcutKind};
pub use stroke::{KeyStroke, Modifiers, MouseStroke, Stroke};
