//! YAML front matter completion.
//!
//! Exclusive provider: when it produces anything, no other source runs.
//! Key/value knowledge is aggregated across all known documents in a
//! per-file cache that is rebuilt whenever a document's metadata changes and
//! merged on every read.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use rustc_hash::FxHashMap;

use super::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::buffer::Buffer;
use crate::context::is_in_front_matter;
use crate::settings::Settings;
use vellum_primitives::Position;

/// One YAML key observed in a document's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlKeyInfo {
	/// The key name.
	pub key: String,
	/// Whether the key holds a list value.
	pub is_list: bool,
	/// Values seen for this key.
	pub completions: BTreeSet<String>,
}

/// Key snippets always offered at column zero. The `~` markers drop the
/// cursor into the value position on insertion.
const KEY_SNIPPETS: &[(&str, &str)] = &[
	("tags: [#]", "tags: [~]"),
	("aliases: [#]", "aliases: [~]"),
	("publish: #", "publish: ~"),
	("cssclass: #", "cssclass: ~"),
];

/// Completes front matter keys and values.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterProvider {
	file_cache: FxHashMap<String, Vec<YamlKeyInfo>>,
}

impl FrontMatterProvider {
	/// Creates a provider with an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds the cache entry for `path` from a document's text.
	pub fn add_file(&mut self, path: &str, text: &str) {
		self.file_cache.insert(path.to_string(), parse_front_matter_keys(text));
	}

	/// Drops the cache entry for `path`.
	pub fn remove_file(&mut self, path: &str) {
		self.file_cache.remove(path);
	}

	/// Drops every cache entry.
	pub fn clear(&mut self) {
		self.file_cache.clear();
	}

	/// Merges all per-file entries into one view, keyed by key name.
	fn merged_keys(&self) -> BTreeMap<String, YamlKeyInfo> {
		let mut merged: BTreeMap<String, YamlKeyInfo> = BTreeMap::new();
		for info in self.file_cache.values().flatten() {
			merged
				.entry(info.key.clone())
				.and_modify(|existing| {
					existing.is_list |= info.is_list;
					existing.completions.extend(info.completions.iter().cloned());
				})
				.or_insert_with(|| info.clone());
		}
		merged
	}

	fn key_snippets(&self, query_lower: &str) -> Vec<Suggestion> {
		let mut results: Vec<Suggestion> = KEY_SNIPPETS
			.iter()
			.filter(|(display, _)| {
				let key = &display[..display.find(':').unwrap_or(display.len())];
				key.starts_with(query_lower)
			})
			.map(|(display, replacement)| Suggestion::new(*display, *replacement))
			.collect();

		for (key, info) in self.merged_keys() {
			if !key.starts_with(query_lower) || KEY_SNIPPETS.iter().any(|(display, _)| display.starts_with(&format!("{key}:"))) {
				continue;
			}
			let suggestion = if info.is_list {
				Suggestion::new(format!("{key}: [#]"), format!("{key}: [~]"))
			} else {
				Suggestion::new(format!("{key}: #"), format!("{key}: ~"))
			};
			results.push(suggestion);
		}
		results
	}

	fn publish_suggestions(query_lower: &str) -> Vec<Suggestion> {
		let possibilities = ["true", "false"];
		let partial: Vec<Suggestion> = possibilities
			.iter()
			.filter(|value| value.starts_with(query_lower) && **value != query_lower)
			.map(|value| Suggestion::from_string(*value))
			.collect();
		if !partial.is_empty() {
			return partial;
		}
		// A fully typed value flips the order so the opposite is one
		// keystroke away.
		match query_lower {
			"true" => vec![Suggestion::from_string("false"), Suggestion::from_string("true")],
			"false" => vec![Suggestion::from_string("true"), Suggestion::from_string("false")],
			_ => Vec::new(),
		}
	}

	fn list_value_suggestions(
		&self,
		info: &YamlKeyInfo,
		buffer: &Buffer,
		ctx: &SuggestionContext,
		settings: &Settings,
	) -> Vec<Suggestion> {
		// List values need a wider word match than the default: tags may
		// contain `/`, `-`, and `_`.
		let Ok(word_char) = Regex::new(&format!("^[{}/\\-_]$", settings.character_regex)) else {
			return Vec::new();
		};
		let (query, _) = buffer.match_word_backwards(
			ctx.end,
			|c| word_char.is_match(c.encode_utf8(&mut [0; 4])),
			settings.max_look_back_distance,
		);

		let suffix = if settings.front_matter_tag_append_suffix { ", " } else { "" };
		let mut results: Vec<Suggestion> = info
			.completions
			.iter()
			.filter(|value| value.starts_with(&query))
			.map(|value| {
				Suggestion::new(value.clone(), format!("{value}{suffix}")).with_override(
					Some(Position::new(ctx.end.line, ctx.end.ch - query.chars().count())),
					None,
				)
			})
			.collect();
		results.sort_by_key(|s| s.display_name.chars().count());
		results
	}

	fn scalar_value_suggestions(info: &YamlKeyInfo, query_lower: &str) -> Vec<Suggestion> {
		let mut results: Vec<Suggestion> = info
			.completions
			.iter()
			.filter(|value| value.to_lowercase().starts_with(query_lower))
			.map(|value| Suggestion::from_string(value.clone()))
			.collect();
		results.sort_by_key(|s| s.display_name.chars().count());
		results
	}
}

impl SuggestionProvider for FrontMatterProvider {
	fn get_suggestions(&self, buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion> {
		if !settings.front_matter_provider_enabled {
			return Vec::new();
		}

		let in_front_matter = is_in_front_matter(buffer, ctx.start);
		if !in_front_matter {
			let first_line = buffer.line(0);
			if ctx.start.line == 0 && (first_line.is_empty() || "front-matter".starts_with(&first_line)) {
				return vec![
					Suggestion::new("front-matter", "---\n~\n---").with_override(Some(Position::new(0, 0)), None),
				];
			}
			return Vec::new();
		}

		let query_lower = ctx.query.to_lowercase();
		if ctx.start.ch == 0 {
			return self.key_snippets(&query_lower);
		}

		let current_line = buffer.line(ctx.start.line);
		if current_line.starts_with("publish:") {
			return Self::publish_suggestions(&query_lower);
		}

		for (key, info) in self.merged_keys() {
			if !current_line.starts_with(&format!("{key}:")) {
				continue;
			}
			if info.is_list {
				return self.list_value_suggestions(&info, buffer, ctx, settings);
			}
			return Self::scalar_value_suggestions(&info, &query_lower);
		}
		Vec::new()
	}

	fn blocks_all_other_providers(&self) -> bool {
		true
	}
}

/// Extracts `YamlKeyInfo` entries from a document's front matter block.
///
/// This is a line-based reading of the common scalar, inline-list, and
/// dash-list shapes, not a YAML parser; anything it cannot read is skipped.
fn parse_front_matter_keys(text: &str) -> Vec<YamlKeyInfo> {
	let mut lines = text.lines();
	if lines.next() != Some("---") {
		return Vec::new();
	}

	let mut keys: Vec<YamlKeyInfo> = Vec::new();
	for line in lines {
		if line == "---" {
			break;
		}

		if let Some(item) = line.strip_prefix("- ").or_else(|| line.trim_start().strip_prefix("- ")) {
			// Dash item under the most recent key.
			if let Some(last) = keys.last_mut() {
				last.is_list = true;
				insert_value(&mut last.completions, item);
			}
			continue;
		}

		let Some((key, value)) = line.split_once(':') else {
			continue;
		};
		let key = key.trim();
		if key.is_empty() || key.contains(char::is_whitespace) {
			continue;
		}

		let value = value.trim();
		let mut info = YamlKeyInfo {
			key: key.to_string(),
			is_list: false,
			completions: BTreeSet::new(),
		};
		if let Some(items) = value.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
			info.is_list = true;
			for item in items.split(',') {
				insert_value(&mut info.completions, item);
			}
		} else if !value.is_empty() {
			insert_value(&mut info.completions, value);
		}
		keys.push(info);
	}
	keys
}

fn insert_value(completions: &mut BTreeSet<String>, raw: &str) {
	let value = raw.trim().trim_matches(|c| c == '"' || c == '\'');
	if !value.is_empty() {
		completions.insert(value.to_string());
	}
}
