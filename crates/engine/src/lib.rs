#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Completion engine for Markdown-like documents.
//!
//! The engine decides what kind of completion context applies at a cursor
//! position (free text, LaTeX math, YAML front matter, callout headers),
//! gathers ranked suggestions from pluggable sources, and tracks snippet
//! tab-stop placeholders through arbitrary document edits.
//!
//! # Main types
//!
//! - [`Buffer`] - rope-backed document collaborator with live marks
//! - [`CompletionEngine`] - trigger/gather/apply facade with event coalescing
//! - [`SnippetManager`] - placeholder lifecycle and tab-stop cycling
//!
//! # Architecture
//!
//! ```text
//! cursor + buffer
//!   └── context detectors ──► SuggestionContext
//!         └── pipeline over providers ──► ranked Suggestion list
//!               └── apply ──► SnippetManager placeholders
//! ```
//!
//! Everything runs synchronously on the host's event thread; the engine has
//! no I/O of its own and consumes persisted formats as in-memory text.

/// The buffer collaborator: rope content, cursor, selection, live marks.
pub mod buffer;
/// Block-structure context detection near the cursor.
pub mod context;
mod engine;
/// One-shot period insertion after completed words.
pub mod period;
/// Ordered suggestion gathering with exclusive short-circuit and dedup.
pub mod pipeline;
/// Suggestion sources and the shared suggestion model.
pub mod provider;
/// Engine settings.
pub mod settings;
/// Snippet tab-stop placeholders.
pub mod snippet;

pub use buffer::Buffer;
pub use engine::CompletionEngine;
pub use pipeline::GatherResult;
pub use provider::{Notice, Suggestion, SuggestionContext, SuggestionProvider};
pub use settings::{Settings, SettingsError, WordInsertionMode};
pub use snippet::SnippetManager;
