//! Stroke processing: turns a stream of strokes into command activations.
//!
//! One [`ShortcutInputProcessor`] per input surface holds all in-flight chord
//! state; the [`ShortcutManager`](strokemap_registry::ShortcutManager) it
//! reads from is shared.

pub mod config;
pub mod dispatch;
pub mod observer;
pub mod processor;
pub mod usage;

pub use config::{ConfigError, EngineConfig, ProcessorOptions};
pub use dispatch::{Activation, ActivationDispatcher, CommandSink, ImmediateDispatcher, QueuedDispatcher};
pub use observer::{CancelReason, Diagnostic, DiagnosticLog, ProcessorObserver};
pub use processor::{ProcessingOutcome, ProcessorState, ShortcutInputProcessor};
pub use usage::ShortcutUsage;
