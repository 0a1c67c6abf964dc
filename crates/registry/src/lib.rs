//! Shortcut group tree and the shared manager that resolves strokes against it.
//!
//! # Layout
//!
//! - [`path`] - `/`-joined group paths with escaping
//! - [`group`] - [`ShortcutGroup`] tree nodes and their bindings
//! - [`manager`] - [`ShortcutManager`], the compiled first-stroke index and
//!   candidate precedence
//!
//! The manager publishes tree and index snapshots atomically. Readers
//! (`resolve_candidates`) never observe a partially rebuilt index, and a
//! rejected load leaves the previously published tree in place.

pub use error::{DuplicateBinding, PathError, ShortcutError};
pub use group::{BindingRef, CommandId, ShortcutBinding, ShortcutGroup};
pub use manager::{Candidate, CandidateRank, ShortcutManager, StrokeIndex};
pub use path::GroupPath;
pub use strokemap_primitives as primitives;

pub mod error;
pub mod group;
pub mod manager;
pub mod path;
