//! Word-list dictionary source.
//!
//! The host reads word-list files from disk; the engine parses their
//! newline-delimited contents into a [`WordIndex`].

use tracing::info;

use super::dictionary::{WordIndex, dictionary_suggestions};
use super::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::buffer::Buffer;
use crate::settings::Settings;

/// Completes words loaded from word lists.
#[derive(Debug, Clone, Default)]
pub struct WordListProvider {
	index: WordIndex,
}

impl WordListProvider {
	/// Creates a provider with an empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses one word list into the index: one word per line, blank lines
	/// ignored, words shorter than `min_word_length` skipped. Returns how
	/// many words were added.
	pub fn load_from_str(&mut self, contents: &str, settings: &Settings) -> usize {
		let mut added = 0;
		for line in contents.lines() {
			let word = line.trim();
			if word.is_empty() || word.chars().count() < settings.min_word_length {
				continue;
			}
			self.index.insert(word);
			added += 1;
		}
		added
	}

	/// Re-sorts the index by word length; call once after the last list has
	/// loaded.
	pub fn finish_loading(&mut self) {
		self.index.sort_by_len();
		if !self.index.is_empty() {
			info!(words = self.index.len(), "loaded word lists");
		}
	}

	/// Drops every loaded word.
	pub fn clear(&mut self) {
		self.index.clear();
	}

	/// Number of loaded words.
	pub fn word_count(&self) -> usize {
		self.index.len()
	}
}

impl SuggestionProvider for WordListProvider {
	fn get_suggestions(&self, _buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion> {
		if !settings.word_list_provider_enabled {
			return Vec::new();
		}
		dictionary_suggestions(&self.index, &ctx.query, settings)
	}
}
