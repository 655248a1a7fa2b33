//! The buffer collaborator: a rope document with cursor, selection, and live
//! marks.
//!
//! This is the engine's view of the host editor. Every edit goes through
//! [`Buffer::replace_range`], which applies a transaction and remaps the
//! cursor, the selection, and all live marks through it - that remapping is
//! what keeps snippet placeholders attached to their text.

use ropey::{Rope, RopeSlice};
use vellum_primitives::{
	Bias, Change, CharLen, MarkAttributes, MarkId, MarkSet, Position, Transaction, char_of_pos,
	line_content_len, pos_of_char,
};

/// A rope-backed text buffer with cursor, selection, and mark state.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
	content: Rope,
	cursor: Position,
	selection: Option<(Position, Position)>,
	marks: MarkSet,
	version: u64,
}

impl Buffer {
	/// Creates a buffer over `text` with the cursor at the origin.
	pub fn new(text: &str) -> Self {
		Self {
			content: Rope::from(text),
			..Self::default()
		}
	}

	/// The full document content.
	pub fn content(&self) -> RopeSlice<'_> {
		self.content.slice(..)
	}

	/// The document as an owned string.
	pub fn text(&self) -> String {
		self.content.to_string()
	}

	/// Number of lines, including the empty line after a trailing newline.
	pub fn line_count(&self) -> usize {
		self.content.len_lines()
	}

	/// Index of the last line.
	pub fn last_line(&self) -> usize {
		self.line_count() - 1
	}

	/// Content of line `n` without its line break. Out-of-range lines read as
	/// empty.
	pub fn line(&self, n: usize) -> String {
		if n >= self.content.len_lines() {
			return String::new();
		}
		let len = line_content_len(self.content(), n);
		let start = self.content.line_to_char(n);
		self.content.slice(start..start + len).to_string()
	}

	/// Character length of line `n`, excluding its line break.
	pub fn line_len(&self, n: usize) -> CharLen {
		line_content_len(self.content(), n)
	}

	/// The text between two positions. Positions are clamped; an inverted
	/// range reads as empty.
	pub fn text_range(&self, from: Position, to: Position) -> String {
		let start = char_of_pos(self.content(), from);
		let end = char_of_pos(self.content(), to).max(start);
		self.content.slice(start..end).to_string()
	}

	/// Replaces `[from, to)` with `text`.
	///
	/// The cursor, the selection, and every live mark are remapped through
	/// the edit; the document version is bumped.
	pub fn replace_range(&mut self, text: &str, from: Position, to: Position) {
		let start = char_of_pos(self.content(), from);
		let end = char_of_pos(self.content(), to).max(start);
		let tx = Transaction::change(
			self.content(),
			vec![Change {
				start,
				end,
				replacement: Some(text.to_string()),
			}],
		);
		self.apply(&tx);
	}

	/// Inserts `text` at `at` without replacing anything.
	pub fn insert(&mut self, text: &str, at: Position) {
		self.replace_range(text, at, at);
	}

	fn apply(&mut self, tx: &Transaction) {
		let cursor = char_of_pos(self.content(), self.cursor);
		let selection = self.selection.map(|(from, to)| {
			(char_of_pos(self.content(), from), char_of_pos(self.content(), to))
		});

		tx.apply(&mut self.content);
		self.marks.map_through(tx.changes());
		self.version += 1;

		let text = self.content.slice(..);
		self.cursor = pos_of_char(text, tx.changes().map_pos(cursor, Bias::Right));
		// Selection endpoints map inward so a replaced selection collapses
		// and is dropped instead of silently re-covering the new text.
		self.selection = selection.and_then(|(from, to)| {
			let from = tx.changes().map_pos(from, Bias::Right);
			let to = tx.changes().map_pos(to, Bias::Left);
			(from < to).then(|| (pos_of_char(text, from), pos_of_char(text, to)))
		});
	}

	/// Moves the cursor, clamping to the document, and drops any selection.
	pub fn set_cursor(&mut self, pos: Position) {
		self.cursor = self.clamp(pos);
		self.selection = None;
	}

	/// The current cursor position.
	pub fn cursor(&self) -> Position {
		self.cursor
	}

	/// Selects `[from, to)` and places the cursor at the selection end.
	pub fn set_selection(&mut self, from: Position, to: Position) {
		let from = self.clamp(from);
		let to = self.clamp(to);
		self.selection = Some((from, to));
		self.cursor = to;
	}

	/// The current selection, if any.
	pub fn selection(&self) -> Option<(Position, Position)> {
		self.selection
	}

	/// Drops the selection, leaving the cursor in place.
	pub fn clear_selection(&mut self) {
		self.selection = None;
	}

	/// Monotonic edit counter.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Creates a live mark over `[from, to)`.
	pub fn mark_range(&mut self, from: Position, to: Position, attributes: MarkAttributes) -> MarkId {
		let start = char_of_pos(self.content(), from);
		let end = char_of_pos(self.content(), to).max(start);
		self.marks.insert(start..end, attributes)
	}

	/// The current span of a mark, or [`None`] once invalidated.
	pub fn find_mark(&self, id: MarkId) -> Option<(Position, Position)> {
		let range = self.marks.find(id)?;
		let text = self.content();
		Some((pos_of_char(text, range.start), pos_of_char(text, range.end)))
	}

	/// Removes a mark.
	pub fn remove_mark(&mut self, id: MarkId) {
		self.marks.remove(id);
	}

	/// Removes every mark.
	pub fn clear_marks(&mut self) {
		self.marks.clear();
	}

	/// Scans left from `cursor` collecting word characters, at most
	/// `max_look_back` of them.
	///
	/// Returns the collected query and the first non-word character hit
	/// ([`None`] when the scan reached the line start or the look-back
	/// limit).
	pub fn match_word_backwards(
		&self,
		cursor: Position,
		is_word_char: impl Fn(char) -> bool,
		max_look_back: usize,
	) -> (String, Option<char>) {
		let line = self.line(cursor.line);
		let chars: Vec<char> = line.chars().collect();
		let end = cursor.ch.min(chars.len());

		let mut query = String::new();
		let mut separator = None;
		for &c in chars[..end].iter().rev().take(max_look_back) {
			if !is_word_char(c) {
				separator = Some(c);
				break;
			}
			query.insert(0, c);
		}
		(query, separator)
	}

	fn clamp(&self, pos: Position) -> Position {
		let line = pos.line.min(self.last_line());
		Position::new(line, pos.ch.min(self.line_len(line)))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn line_access_strips_line_breaks() {
		let buffer = Buffer::new("alpha\nbeta\n");
		assert_eq!(buffer.line(0), "alpha");
		assert_eq!(buffer.line(1), "beta");
		assert_eq!(buffer.line(2), "");
		assert_eq!(buffer.line(9), "");
		assert_eq!(buffer.line_count(), 3);
	}

	#[test]
	fn replace_range_moves_cursor_past_insertion() {
		let mut buffer = Buffer::new("hello world");
		buffer.set_cursor(Position::new(0, 5));
		buffer.replace_range(",", Position::new(0, 5), Position::new(0, 5));
		assert_eq!(buffer.text(), "hello, world");
		assert_eq!(buffer.cursor(), Position::new(0, 6));
	}

	#[test]
	fn replace_range_over_selection_replaces_it() {
		let mut buffer = Buffer::new("abc");
		buffer.set_selection(Position::new(0, 0), Position::new(0, 3));
		buffer.replace_range("x", Position::new(0, 0), Position::new(0, 3));
		assert_eq!(buffer.text(), "x");
		assert_eq!(buffer.selection(), None);
		assert_eq!(buffer.cursor(), Position::new(0, 1));
	}

	#[test]
	fn marks_survive_edits_elsewhere() {
		let mut buffer = Buffer::new("one two three");
		let id = buffer.mark_range(Position::new(0, 4), Position::new(0, 7), MarkAttributes::default());
		buffer.replace_range("zero ", Position::new(0, 0), Position::new(0, 0));
		assert_eq!(
			buffer.find_mark(id),
			Some((Position::new(0, 9), Position::new(0, 12)))
		);
		assert_eq!(buffer.text_range(Position::new(0, 9), Position::new(0, 12)), "two");
	}

	#[test]
	fn mark_deleted_with_its_text_is_invalidated() {
		let mut buffer = Buffer::new("one two three");
		let id = buffer.mark_range(Position::new(0, 4), Position::new(0, 7), MarkAttributes::default());
		buffer.replace_range("", Position::new(0, 3), Position::new(0, 8));
		assert_eq!(buffer.find_mark(id), None);
	}

	#[test]
	fn match_word_backwards_returns_query_and_separator() {
		let buffer = Buffer::new("foo bar");
		let (query, separator) = buffer.match_word_backwards(Position::new(0, 7), char::is_alphabetic, 50);
		assert_eq!(query, "bar");
		assert_eq!(separator, Some(' '));
	}

	#[test]
	fn match_word_backwards_at_line_start_has_no_separator() {
		let buffer = Buffer::new("foo");
		let (query, separator) = buffer.match_word_backwards(Position::new(0, 3), char::is_alphabetic, 50);
		assert_eq!(query, "foo");
		assert_eq!(separator, None);
	}

	#[test]
	fn match_word_backwards_honors_look_back_limit() {
		let buffer = Buffer::new("abcdefgh");
		let (query, separator) = buffer.match_word_backwards(Position::new(0, 8), char::is_alphabetic, 3);
		assert_eq!(query, "fgh");
		assert_eq!(separator, None);
	}

	#[test]
	fn version_bumps_on_every_edit() {
		let mut buffer = Buffer::new("");
		assert_eq!(buffer.version(), 0);
		buffer.insert("a", Position::new(0, 0));
		buffer.insert("b", Position::new(0, 1));
		assert_eq!(buffer.version(), 2);
	}

	#[test]
	fn text_range_clamps_and_rejects_inverted_ranges() {
		let buffer = Buffer::new("short\nlines");
		assert_eq!(buffer.text_range(Position::new(0, 0), Position::new(0, 99)), "short");
		assert_eq!(buffer.text_range(Position::new(1, 3), Position::new(0, 0)), "");
	}
}
