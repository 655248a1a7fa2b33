use std::sync::LazyLock;

use regex::{Match, Regex};

static BLOCKQUOTE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[ \t]*>[ \t]*)+").unwrap());

// [!TYPE]- TITLE
static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\[!?([^\]]*)\])([+-]?)([ \t]*)(.*)$").unwrap());

// [!TYPE, still being typed
static HEADER_PARTIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\[!?([^\]]*))$").unwrap());

/// A leading blockquote run (`> > `).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockquotePrefix {
	/// Number of `>` characters in the run.
	pub depth: usize,
	/// Character width of the whole prefix, including its whitespace.
	pub ch_offset: usize,
}

/// Extracts the blockquote prefix of `line`, if present.
pub fn blockquote_prefix(line: &str) -> Option<BlockquotePrefix> {
	let matched = BLOCKQUOTE_PREFIX.find(line)?;
	let text = matched.as_str();
	Some(BlockquotePrefix {
		depth: text.matches('>').count(),
		ch_offset: text.chars().count(),
	})
}

/// One group of a callout header, with char-offset spans relative to the
/// prefix-stripped line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSpan {
	/// Span start, in characters.
	pub start: usize,
	/// Span end (exclusive), in characters.
	pub end: usize,
	/// The trimmed group content.
	pub text: String,
	/// The raw matched text.
	pub raw_text: String,
}

/// A parsed `> [!type]- title` header with the quote prefix already
/// stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalloutHeader {
	/// The bracketed type group (`[!type]`, brackets included in the span).
	pub kind: HeaderSpan,
	/// The fold indicator and its trailing whitespace.
	pub foldable: HeaderSpan,
	/// The title text.
	pub title: HeaderSpan,
}

impl CalloutHeader {
	/// Whether the header's closing bracket has been typed yet.
	pub fn is_complete(&self) -> bool {
		self.kind.raw_text.ends_with(']')
	}
}

/// Parses a callout header from a line with its blockquote prefix stripped.
///
/// Falls back to the partial `[!type` form to support in-progress typing.
pub fn callout_header(line: &str) -> Option<CalloutHeader> {
	if let Some(caps) = HEADER.captures(line) {
		let kind_outer = caps.get(1)?;
		let fold = caps.get(3)?;
		let fold_ws = caps.get(4)?;
		let title = caps.get(5)?;
		return Some(CalloutHeader {
			kind: span(line, kind_outer, caps.get(2)?.as_str().trim()),
			foldable: HeaderSpan {
				text: fold.as_str().trim().to_string(),
				raw_text: format!("{}{}", fold.as_str(), fold_ws.as_str()),
				..char_bounds(line, fold)
			},
			title: span(line, title, title.as_str().trim()),
		});
	}

	let caps = HEADER_PARTIAL.captures(line)?;
	let kind_outer = caps.get(1)?;
	Some(CalloutHeader {
		kind: span(line, kind_outer, caps.get(2)?.as_str().trim()),
		..CalloutHeader::default()
	})
}

fn span(line: &str, outer: Match<'_>, text: &str) -> HeaderSpan {
	HeaderSpan {
		text: text.to_string(),
		raw_text: outer.as_str().to_string(),
		..char_bounds(line, outer)
	}
}

/// Converts a match's byte span to char offsets.
fn char_bounds(line: &str, matched: Match<'_>) -> HeaderSpan {
	let start = line[..matched.start()].chars().count();
	HeaderSpan {
		start,
		end: start + matched.as_str().chars().count(),
		..HeaderSpan::default()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn blockquote_prefix_counts_depth() {
		let prefix = blockquote_prefix("> > > text").unwrap();
		assert_eq!(prefix.depth, 3);
		assert_eq!(prefix.ch_offset, 6);
		assert_eq!(blockquote_prefix("plain"), None);
	}

	#[test]
	fn blockquote_prefix_spans_mixed_whitespace() {
		let prefix = blockquote_prefix("  >\t> rest").unwrap();
		assert_eq!(prefix.depth, 2);
		assert_eq!(prefix.ch_offset, 6);
	}

	#[test]
	fn full_header_records_all_groups() {
		let header = callout_header("[!note]- My Title").unwrap();
		assert_eq!(header.kind.start, 0);
		assert_eq!(header.kind.end, 7);
		assert_eq!(header.kind.text, "note");
		assert_eq!(header.kind.raw_text, "[!note]");
		assert!(header.is_complete());
		assert_eq!(header.foldable.raw_text, "- ");
		assert_eq!(header.foldable.text, "-");
		assert_eq!(header.title.text, "My Title");
		assert_eq!(header.title.start, 9);
	}

	#[test]
	fn header_without_fold_or_title() {
		let header = callout_header("[!tip]").unwrap();
		assert!(header.is_complete());
		assert_eq!(header.foldable.raw_text, "");
		assert_eq!(header.title.raw_text, "");
	}

	#[test]
	fn partial_header_is_recognized_while_typing() {
		let header = callout_header("[!no").unwrap();
		assert!(!header.is_complete());
		assert_eq!(header.kind.text, "no");
		assert_eq!(header.kind.start, 0);
		assert_eq!(header.kind.end, 4);
	}

	#[test]
	fn non_header_lines_parse_to_none() {
		assert_eq!(callout_header("plain text"), None);
		assert_eq!(callout_header("note] backwards"), None);
	}

	#[test]
	fn spans_are_char_offsets_for_non_ascii_titles() {
		let header = callout_header("[!zitat] \u{fc}ber etwas").unwrap();
		assert_eq!(header.title.start, 9);
		assert_eq!(header.title.text, "\u{fc}ber etwas");
	}
}
