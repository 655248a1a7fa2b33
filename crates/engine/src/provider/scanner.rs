//! Scanned-word dictionary source.
//!
//! Harvests words from document text so completions reflect the user's own
//! writing. Math/code spans, wiki links, and URLs are skipped so their
//! contents never pollute the index.

use regex::Regex;
use tracing::debug;

use super::blacklist::SuggestionBlacklist;
use super::dictionary::{WordIndex, dictionary_suggestions};
use super::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::buffer::Buffer;
use crate::settings::{Settings, SettingsError};

/// Completes words harvested from scanned documents.
#[derive(Debug, Clone, Default)]
pub struct ScannerProvider {
	index: WordIndex,
}

impl ScannerProvider {
	/// Creates a provider with an empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Scans `text`, adding every word of the configured character class
	/// that is not inside a `$...$`, `` `...` `` or `[...]` span or a URL.
	/// Blacklisted words never enter the index. Returns how many new words
	/// were added.
	pub fn scan_text(
		&mut self,
		text: &str,
		settings: &Settings,
		blacklist: &SuggestionBlacklist,
	) -> Result<usize, SettingsError> {
		let pattern = scan_pattern(&settings.character_regex)?;
		let mut added = 0;
		for captures in pattern.captures_iter(text) {
			let Some(word) = captures.get(1) else {
				continue;
			};
			if word.as_str().chars().count() < settings.min_word_length {
				continue;
			}
			if self.add_word(word.as_str(), blacklist) {
				added += 1;
			}
		}
		debug!(added, total = self.index.len(), "scanned document text");
		Ok(added)
	}

	/// Loads a previously exported index: one word per line.
	pub fn load_from_str(&mut self, contents: &str, blacklist: &SuggestionBlacklist) {
		for word in contents.lines() {
			self.add_word(word.trim(), blacklist);
		}
	}

	/// Serializes the index as newline-delimited text; persisting it is the
	/// host's concern.
	pub fn to_export_string(&self) -> String {
		let mut words: Vec<&str> = self.index.words().collect();
		words.sort_unstable();
		words.join("\n")
	}

	/// Drops every scanned word.
	pub fn delete_all_words(&mut self) {
		self.index.clear();
	}

	/// Number of scanned words.
	pub fn word_count(&self) -> usize {
		self.index.len()
	}

	fn add_word(&mut self, word: &str, blacklist: &SuggestionBlacklist) -> bool {
		if word.is_empty() || blacklist.has_text(word) {
			return false;
		}
		self.index.insert_unique(word)
	}
}

impl SuggestionProvider for ScannerProvider {
	fn get_suggestions(&self, _buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion> {
		if !settings.scanner_provider_enabled {
			return Vec::new();
		}
		dictionary_suggestions(&self.index, &ctx.query, settings)
	}
}

/// The scan pattern: skip spans first, then capture runs of word
/// characters.
fn scan_pattern(class: &str) -> Result<Regex, SettingsError> {
	Regex::new(&format!(r"(?s)\$+.*?\$+|`+.*?`+|\[+.*?\]+|https?://[^\n\s]+|([{class}]+)")).map_err(|source| {
		SettingsError::InvalidCharacterRegex {
			class: class.to_string(),
			source: Box::new(source),
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan(text: &str) -> ScannerProvider {
		let mut provider = ScannerProvider::new();
		provider.scan_text(text, &Settings::default(), &SuggestionBlacklist::new()).unwrap();
		provider
	}

	fn words(provider: &ScannerProvider) -> Vec<&str> {
		let mut words: Vec<&str> = provider.index.words().collect();
		words.sort_unstable();
		words
	}

	#[test]
	fn scans_plain_words() {
		let provider = scan("hello wonderful world");
		assert_eq!(words(&provider), vec!["hello", "wonderful", "world"]);
	}

	#[test]
	fn skips_math_code_and_link_spans() {
		let provider = scan("before $inline math$ `code span` [link target] after");
		assert_eq!(words(&provider), vec!["after", "before"]);
	}

	#[test]
	fn skips_urls() {
		let provider = scan("see https://example.com/some-page for details");
		assert_eq!(words(&provider), vec!["details", "for", "see"]);
	}

	#[test]
	fn multiline_math_spans_are_skipped() {
		let provider = scan("intro $$\nfrac stuff\n$$ outro");
		assert_eq!(words(&provider), vec!["intro", "outro"]);
	}

	#[test]
	fn duplicate_words_are_indexed_once() {
		let provider = scan("echo echo echo");
		assert_eq!(provider.word_count(), 1);
	}

	#[test]
	fn blacklisted_words_never_enter_the_index() {
		let mut blacklist = SuggestionBlacklist::new();
		blacklist.add_text("secret");
		let mut provider = ScannerProvider::new();
		provider.scan_text("public secret", &Settings::default(), &blacklist).unwrap();
		assert_eq!(words(&provider), vec!["public"]);
	}

	#[test]
	fn short_words_are_skipped() {
		let provider = scan("a to the moon");
		assert_eq!(words(&provider), vec!["moon", "the", "to"]);
	}

	#[test]
	fn export_round_trips_through_load() {
		let provider = scan("gamma alpha beta");
		let exported = provider.to_export_string();
		assert_eq!(exported, "alpha\nbeta\ngamma");

		let mut restored = ScannerProvider::new();
		restored.load_from_str(&exported, &SuggestionBlacklist::new());
		assert_eq!(restored.word_count(), 3);
	}

	#[test]
	fn invalid_character_class_is_an_error() {
		let mut provider = ScannerProvider::new();
		let settings = Settings {
			character_regex: "z-a".to_string(),
			..Settings::default()
		};
		assert!(provider.scan_text("text", &settings, &SuggestionBlacklist::new()).is_err());
	}
}
