//! Callout type completion in blockquote headers.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use vellum_primitives::Position;

use super::blacklist::SuggestionBlacklist;
use super::{Notice, Suggestion, SuggestionContext, SuggestionProvider};
use crate::buffer::Buffer;
use crate::context::{blockquote_prefix, callout_header};
use crate::settings::Settings;

/// Completes `> [!type]` callout headers from a loadable catalog.
#[derive(Debug, Clone)]
pub struct CalloutProvider {
	loaded: Vec<Suggestion>,
}

impl Default for CalloutProvider {
	fn default() -> Self {
		Self {
			loaded: default_callout_suggestions(),
		}
	}
}

/// Why a callout catalog could not be used.
#[derive(Debug, Error)]
pub enum CalloutCatalogError {
	/// The catalog is not valid JSON of the expected shape.
	#[error("invalid callout catalog: {0}")]
	Json(#[from] serde_json::Error),
	/// A display name contains a newline.
	#[error("display name cannot contain a newline: {0}")]
	NewlineInDisplayName(String),
}

/// One entry of the persisted catalog: a full suggestion object or a plain
/// string used for both display and replacement.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
	Plain(String),
	Full(Suggestion),
}

impl CalloutProvider {
	/// Creates a provider with the built-in catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the catalog from a JSON array of suggestion objects or plain
	/// strings.
	///
	/// Malformed input keeps the built-in defaults and returns a non-fatal
	/// notice instead of failing the pipeline.
	pub fn load_from_json(&mut self, data: &str, blacklist: &SuggestionBlacklist) -> Option<Notice> {
		match parse_callout_catalog(data) {
			Ok(suggestions) => {
				self.loaded = blacklist.filter(suggestions);
				None
			}
			Err(err) => {
				warn!(%err, "failed to parse callout catalog, falling back to defaults");
				self.loaded = blacklist.filter(default_callout_suggestions());
				Some(Notice(format!("Failed to parse callout suggestions: {err}. Using default suggestions.")))
			}
		}
	}

	/// The catalog currently in use.
	pub fn loaded(&self) -> &[Suggestion] {
		&self.loaded
	}
}

impl SuggestionProvider for CalloutProvider {
	fn get_suggestions(&self, buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion> {
		if !settings.callout_provider_enabled {
			return Vec::new();
		}

		let line_number = ctx.start.line;
		let line = buffer.line(line_number);
		let Some(quote) = blockquote_prefix(&line) else {
			return Vec::new();
		};

		// Only the top line of a quote block can declare a callout; a line
		// whose predecessor is at least as deep is a continuation.
		let above = (line_number > 0).then(|| blockquote_prefix(&buffer.line(line_number - 1))).flatten();
		if above.is_some_and(|above| above.depth >= quote.depth) {
			return Vec::new();
		}

		let trimmed: String = line.chars().skip(quote.ch_offset).collect();
		let Some(header) = callout_header(&trimmed) else {
			return Vec::new();
		};

		// The cursor must sit inside the type text. The closing bracket is
		// excluded: completing from behind `]` would be surprising.
		let Some(cursor) = ctx.end.ch.checked_sub(quote.ch_offset) else {
			return Vec::new();
		};
		let type_end = if header.is_complete() { header.kind.end - 1 } else { header.kind.end };
		if cursor < header.kind.start + 1 || cursor > type_end {
			return Vec::new();
		}

		let replace_foldable = if header.foldable.raw_text.is_empty() { " " } else { &header.foldable.raw_text };
		let replace_title = &header.title.raw_text;
		let search = header.kind.text.to_lowercase();

		self.loaded
			.iter()
			.filter(|s| {
				s.display_name_folded(true).starts_with(&search) || s.replacement.to_lowercase().starts_with(&search)
			})
			.map(|s| {
				s.with_replacement(format!("[!{}]{}{}", s.replacement, replace_foldable, replace_title))
					.with_override(
						Some(Position::new(ctx.start.line, quote.ch_offset)),
						Some(Position::new(ctx.end.line, line.chars().count())),
					)
			})
			.collect()
	}
}

fn parse_callout_catalog(data: &str) -> Result<Vec<Suggestion>, CalloutCatalogError> {
	let entries: Vec<CatalogEntry> = serde_json::from_str(data)?;
	let suggestions: Vec<Suggestion> = entries
		.into_iter()
		.map(|entry| match entry {
			CatalogEntry::Plain(text) => Suggestion::from_string(text),
			CatalogEntry::Full(suggestion) => suggestion,
		})
		.collect();

	if let Some(invalid) = suggestions.iter().find(|s| s.display_name.contains('\n')) {
		return Err(CalloutCatalogError::NewlineInDisplayName(invalid.display_name.clone()));
	}
	Ok(suggestions)
}

/// The built-in catalog, generated lazily to avoid startup allocation when a
/// custom catalog is loaded anyway.
fn default_callout_suggestions() -> Vec<Suggestion> {
	[
		("Note", "note"),
		("Summary", "summary"),
		("Info", "info"),
		("Tip", "tip"),
		("Hint", "hint"),
		("Example", "example"),
		("Quote", "quote"),
		("Important", "important"),
		("Warning", "warning"),
		("Success", "success"),
		("Error", "error"),
		("To-Do", "todo"),
		("Check", "check"),
		("Done", "done"),
		("Question", "question"),
		("Caution", "caution"),
		("Attention", "attention"),
		("Failure", "failure"),
		("Fail", "fail"),
		("Missing", "missing"),
		("Danger", "danger"),
		("Bug", "bug"),
		("Help", "help"),
		("Abstract", "abstract"),
		("Cite", "cite"),
		("TL;DR", "tldr"),
		("FAQ", "faq"),
	]
	.into_iter()
	.map(|(display, replacement)| Suggestion::new(display, replacement))
	.collect()
}
