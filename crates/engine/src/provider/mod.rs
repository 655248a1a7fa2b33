//! Suggestion sources and the shared suggestion model.

/// Blacklisted display names.
pub mod blacklist;
/// Callout type completion.
pub mod callout;
/// Case/diacritic-folding dictionary lookup.
pub mod dictionary;
/// YAML front matter completion.
pub mod front_matter;
/// LaTeX command completion inside math blocks.
pub mod latex;
/// Words harvested from scanned documents.
pub mod scanner;
/// Words loaded from word-list text.
pub mod word_list;

use serde::Deserialize;
use vellum_primitives::Position;

use crate::buffer::Buffer;
use crate::settings::Settings;

/// Marks a tab-stop placeholder inside a replacement string.
pub const PLACEHOLDER_CHAR: char = '#';

/// Marks a character deleted immediately after insertion, used to drop an
/// inline cursor hint.
pub const DELETE_CHAR: char = '~';

/// A single completion candidate.
///
/// `display_name` is what is matched and shown; `replacement` is inserted
/// verbatim and may embed the `#`/`~` snippet sentinels. Display names never
/// contain a newline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
	/// The matched and displayed text.
	pub display_name: String,
	/// The text inserted on selection.
	pub replacement: String,
	/// Replacement start overriding the context's query start.
	#[serde(skip)]
	pub override_start: Option<Position>,
	/// Replacement end overriding the context's query end.
	#[serde(skip)]
	pub override_end: Option<Position>,
	/// Optional icon name for the popup.
	#[serde(default)]
	pub icon: Option<String>,
	/// Optional display color for the popup.
	#[serde(default)]
	pub color: Option<String>,
}

impl Suggestion {
	/// Creates a suggestion with distinct display and replacement text.
	pub fn new(display_name: impl Into<String>, replacement: impl Into<String>) -> Self {
		Self {
			display_name: display_name.into(),
			replacement: replacement.into(),
			override_start: None,
			override_end: None,
			icon: None,
			color: None,
		}
	}

	/// Creates a suggestion whose replacement equals its display name.
	pub fn from_string(text: impl Into<String>) -> Self {
		let text = text.into();
		Self::new(text.clone(), text)
	}

	/// Returns a copy with the replacement swapped out.
	pub fn with_replacement(&self, replacement: impl Into<String>) -> Self {
		Self {
			replacement: replacement.into(),
			..self.clone()
		}
	}

	/// Returns a copy with the override range set.
	pub fn with_override(&self, start: Option<Position>, end: Option<Position>) -> Self {
		Self {
			override_start: start,
			override_end: end,
			..self.clone()
		}
	}

	/// Whether inserting this suggestion starts a snippet.
	pub fn has_snippet_markers(&self) -> bool {
		self.replacement.contains([PLACEHOLDER_CHAR, DELETE_CHAR])
	}

	/// The display name folded to lowercase when `lower_case` is set.
	pub fn display_name_folded(&self, lower_case: bool) -> String {
		if lower_case { self.display_name.to_lowercase() } else { self.display_name.clone() }
	}
}

/// The word being completed and where it sits in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionContext {
	/// The text between `start` and `end`.
	pub query: String,
	/// Where the query starts.
	pub start: Position,
	/// The cursor position the query ends at.
	pub end: Position,
	/// The character immediately before `start`, or [`None`] at a line
	/// start.
	pub separator_char: Option<char>,
}

/// A pluggable suggestion source.
pub trait SuggestionProvider {
	/// Produces the source's candidates for `ctx`.
	fn get_suggestions(&self, buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion>;

	/// A non-empty result from an exclusive source suppresses every source
	/// after it.
	fn blocks_all_other_providers(&self) -> bool {
		false
	}
}

/// A non-fatal, user-visible message produced by a load operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);
