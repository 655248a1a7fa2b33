//! Engine settings.
//!
//! The host owns persistence and the settings UI; the engine only consumes
//! the resulting value. Serde defaults keep older stored settings loadable
//! when new fields appear.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a dictionary match is turned into inserted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordInsertionMode {
	/// Match with exact case and replace the typed query.
	MatchCaseReplace,
	/// Match case-insensitively and replace the query with the entry's
	/// casing.
	#[default]
	IgnoreCaseReplace,
	/// Match case-insensitively, keep the typed prefix, and append only the
	/// remainder of the entry.
	IgnoreCaseAppend,
}

/// Tunables for triggering, matching, and the individual providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
	/// Character class (regex set body) treated as word characters.
	pub character_regex: String,
	/// Maximum characters scanned leftward for the query word.
	pub max_look_back_distance: usize,
	/// Shortest word admitted into dictionary indices.
	pub min_word_length: usize,
	/// Shortest query that triggers dictionary lookup.
	pub min_word_trigger_length: usize,
	/// How matched words are inserted.
	pub word_insertion_mode: WordInsertionMode,
	/// Fold diacritics when filtering dictionary entries.
	pub ignore_diacritics_when_filtering: bool,
	/// Arm the period inserter after a completed word.
	pub insert_period_after_spaces: bool,
	/// LaTeX command completion inside math blocks.
	pub latex_provider_enabled: bool,
	/// Also offer LaTeX completion inside code blocks.
	pub latex_trigger_in_code_blocks: bool,
	/// Words harvested from scanned documents.
	pub scanner_provider_enabled: bool,
	/// Words loaded from word-list files.
	pub word_list_provider_enabled: bool,
	/// YAML front matter key/value completion.
	pub front_matter_provider_enabled: bool,
	/// Append `", "` after a completed front matter list value.
	pub front_matter_tag_append_suffix: bool,
	/// Callout type completion in blockquote headers.
	pub callout_provider_enabled: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			character_regex: "a-zA-Z\u{f6}\u{e4}\u{fc}\u{d6}\u{c4}\u{dc}\u{df}".to_string(),
			max_look_back_distance: 50,
			min_word_length: 2,
			min_word_trigger_length: 3,
			word_insertion_mode: WordInsertionMode::default(),
			ignore_diacritics_when_filtering: false,
			insert_period_after_spaces: false,
			latex_provider_enabled: true,
			latex_trigger_in_code_blocks: false,
			scanner_provider_enabled: true,
			word_list_provider_enabled: true,
			front_matter_provider_enabled: true,
			front_matter_tag_append_suffix: true,
			callout_provider_enabled: true,
		}
	}
}

/// Problems with a settings value the engine cannot work with.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The configured word character class is not a valid regex set body.
	#[error("invalid word character class `{class}`")]
	InvalidCharacterRegex {
		/// The offending class body.
		class: String,
		/// The underlying regex error.
		#[source]
		source: Box<regex::Error>,
	},
}

impl Settings {
	/// Compiles the configured word character class into a single-character
	/// matcher.
	pub fn word_char_pattern(&self) -> Result<Regex, SettingsError> {
		compile_char_class(&self.character_regex)
	}
}

/// Compiles `class` (a regex set body, plus any extra literal members) into a
/// matcher for one character.
pub(crate) fn compile_char_class(class: &str) -> Result<Regex, SettingsError> {
	Regex::new(&format!("^[{class}]$")).map_err(|source| SettingsError::InvalidCharacterRegex {
		class: class.to_string(),
		source: Box::new(source),
	})
}
