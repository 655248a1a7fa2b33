//! Case/diacritic-folding prefix lookup over first-character word buckets.
//!
//! The matcher itself is stateless; the bucketed [`WordIndex`] is owned by
//! the providers that feed it (word lists, the document scanner).

use rustc_hash::FxHashMap;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::Suggestion;
use crate::settings::{Settings, WordInsertionMode};

/// Words bucketed by their first character.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
	buckets: FxHashMap<char, Vec<String>>,
}

impl WordIndex {
	/// Creates an empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `word` to its first-character bucket.
	pub fn insert(&mut self, word: &str) {
		let Some(first) = word.chars().next() else {
			return;
		};
		self.buckets.entry(first).or_default().push(word.to_string());
	}

	/// Appends `word` unless its bucket already holds it. Returns whether the
	/// word was added.
	pub fn insert_unique(&mut self, word: &str) -> bool {
		let Some(first) = word.chars().next() else {
			return false;
		};
		let bucket = self.buckets.entry(first).or_default();
		if bucket.iter().any(|existing| existing == word) {
			return false;
		}
		bucket.push(word.to_string());
		true
	}

	/// The bucket for `first`, empty when absent.
	pub fn bucket(&self, first: char) -> &[String] {
		self.buckets.get(&first).map(Vec::as_slice).unwrap_or_default()
	}

	/// All buckets, keyed by first character.
	pub fn buckets(&self) -> impl Iterator<Item = (char, &[String])> {
		self.buckets.iter().map(|(first, words)| (*first, words.as_slice()))
	}

	/// All words across all buckets, in bucket order.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.buckets.values().flatten().map(String::as_str)
	}

	/// Sorts every bucket by word length, shortest first.
	pub fn sort_by_len(&mut self) {
		for bucket in self.buckets.values_mut() {
			bucket.sort_by_key(|word| word.chars().count());
		}
	}

	/// Total word count.
	pub fn len(&self) -> usize {
		self.buckets.values().map(Vec::len).sum()
	}

	/// True when no words are indexed.
	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	/// Drops every word.
	pub fn clear(&mut self) {
		self.buckets.clear();
	}
}

/// Lowercases `text` when `fold` is set.
pub(crate) fn maybe_lowercase(text: &str, fold: bool) -> String {
	if fold { text.to_lowercase() } else { text.to_string() }
}

/// Strips diacritics via canonical decomposition and combining-mark removal.
pub(crate) fn remove_diacritics(text: &str) -> String {
	text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn fold(text: &str, ignore_case: bool, ignore_diacritics: bool) -> String {
	let folded = maybe_lowercase(text, ignore_case);
	if ignore_diacritics { remove_diacritics(&folded) } else { folded }
}

/// Splits off the suffix of `word` left over once its folded prefix covers
/// `folded_len` characters of the folded query.
fn suffix_after_folded_prefix(word: &str, folded_len: usize, ignore_case: bool, ignore_diacritics: bool) -> String {
	let mut covered = 0;
	let mut chars = word.chars();
	while covered < folded_len {
		let Some(c) = chars.next() else {
			break;
		};
		covered += fold(&c.to_string(), ignore_case, ignore_diacritics).chars().count();
	}
	chars.collect()
}

/// Prefix-matches `query` against the index, honoring the configured case
/// and diacritic folding and the insertion mode.
///
/// Results are sorted ascending by display length - shorter completions
/// first is the engine's entire ranking.
pub fn dictionary_suggestions(index: &WordIndex, query: &str, settings: &Settings) -> Vec<Suggestion> {
	if query.is_empty() || query.chars().count() < settings.min_word_trigger_length {
		return Vec::new();
	}

	let ignore_case = settings.word_insertion_mode != WordInsertionMode::MatchCaseReplace;
	let ignore_diacritics = settings.ignore_diacritics_when_filtering;
	let folded_query = fold(query, ignore_case, ignore_diacritics);
	let Some(first) = folded_query.chars().next() else {
		return Vec::new();
	};

	let mut lists: Vec<&[String]> = vec![index.bucket(first)];
	if ignore_case {
		for upper in first.to_uppercase() {
			if upper != first {
				lists.push(index.bucket(upper));
			}
		}
	}
	if ignore_diacritics {
		// Buckets keyed by a diacritic first character are not covered by
		// the two direct lookups above.
		for (key, words) in index.buckets() {
			if key == first || (ignore_case && key.to_lowercase().next() == Some(first)) {
				continue;
			}
			let folded_key = fold(&key.to_string(), ignore_case, true);
			if folded_key.chars().next() == Some(first) {
				lists.push(words);
			}
		}
	}

	let mut result = Vec::new();
	for words in lists {
		for word in words {
			if !fold(word, ignore_case, ignore_diacritics).starts_with(&folded_query) {
				continue;
			}
			let suggestion = if settings.word_insertion_mode == WordInsertionMode::IgnoreCaseAppend {
				// Keep the typed prefix's casing and append only the
				// remainder of the match.
				let rest = suffix_after_folded_prefix(word, folded_query.chars().count(), ignore_case, ignore_diacritics);
				Suggestion::from_string(format!("{query}{rest}"))
			} else {
				Suggestion::from_string(word.as_str())
			};
			result.push(suggestion);
		}
	}

	result.sort_by_key(|s| s.display_name.chars().count());
	result
}
