//! Blacklisted display names, filtered from every result set.

use rustc_hash::FxHashSet;

use super::Suggestion;

/// A set of display names that must never be suggested.
///
/// The host persists the set as newline-delimited text; the engine consumes
/// and produces that format as in-memory strings.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBlacklist {
	set: FxHashSet<String>,
}

impl SuggestionBlacklist {
	/// Creates an empty blacklist.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a suggestion's display name.
	pub fn add(&mut self, suggestion: &Suggestion) {
		self.add_text(&suggestion.display_name);
	}

	/// Adds a raw display name.
	pub fn add_text(&mut self, text: &str) {
		self.set.insert(text.to_string());
	}

	/// Whether a suggestion's display name is blacklisted.
	pub fn has(&self, suggestion: &Suggestion) -> bool {
		self.has_text(&suggestion.display_name)
	}

	/// Whether a raw display name is blacklisted.
	pub fn has_text(&self, text: &str) -> bool {
		self.set.contains(text)
	}

	/// Drops blacklisted entries from `suggestions`.
	pub fn filter(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
		if self.set.is_empty() {
			return suggestions;
		}
		suggestions.into_iter().filter(|s| !self.has(s)).collect()
	}

	/// Loads entries from newline-delimited text; blank lines are ignored.
	pub fn load_from_str(&mut self, contents: &str) {
		for word in contents.lines() {
			if word.is_empty() {
				continue;
			}
			self.add_text(word);
		}
	}

	/// Serializes the set as newline-delimited text.
	pub fn to_export_string(&self) -> String {
		let mut words: Vec<&str> = self.set.iter().map(String::as_str).collect();
		words.sort_unstable();
		words.join("\n")
	}

	/// Number of blacklisted names.
	pub fn len(&self) -> usize {
		self.set.len()
	}

	/// True when nothing is blacklisted.
	pub fn is_empty(&self) -> bool {
		self.set.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filter_drops_blacklisted_names() {
		let mut blacklist = SuggestionBlacklist::new();
		blacklist.add_text("bad");
		let kept = blacklist.filter(vec![Suggestion::from_string("good"), Suggestion::from_string("bad")]);
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].display_name, "good");
	}

	#[test]
	fn load_skips_blank_lines() {
		let mut blacklist = SuggestionBlacklist::new();
		blacklist.load_from_str("one\n\ntwo\r\nthree\n");
		assert_eq!(blacklist.len(), 3);
		assert!(blacklist.has_text("two"));
	}

	#[test]
	fn export_is_sorted_and_newline_delimited() {
		let mut blacklist = SuggestionBlacklist::new();
		blacklist.load_from_str("zeta\nalpha");
		assert_eq!(blacklist.to_export_string(), "alpha\nzeta");
	}
}
