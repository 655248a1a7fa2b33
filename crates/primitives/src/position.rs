use ropey::RopeSlice;

/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for Vellum.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
pub type CharLen = usize;

/// A line/column cursor position.
///
/// `ch` is a character offset within the line. Columns beyond the line's
/// content length are legal and are clamped at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
	/// Zero-based line index.
	pub line: usize,
	/// Character offset within the line.
	pub ch: usize,
}

impl Position {
	/// Creates a position at the given line and column.
	pub fn new(line: usize, ch: usize) -> Self {
		Self { line, ch }
	}

	/// Returns a copy with the column replaced.
	pub fn with_ch(self, ch: usize) -> Self {
		Self { ch, ..self }
	}
}

/// Number of characters on `line`, excluding its line break.
///
/// Out-of-range lines read as empty.
pub fn line_content_len(text: RopeSlice, line: usize) -> CharLen {
	if line >= text.len_lines() {
		return 0;
	}
	let slice = text.line(line);
	let mut len = slice.len_chars();
	if len > 0 && slice.char(len - 1) == '\n' {
		len -= 1;
	}
	if len > 0 && slice.char(len - 1) == '\r' {
		len -= 1;
	}
	len
}

/// Converts a position to an absolute char index.
///
/// The line is clamped to the last line and the column to the line's content
/// length, so out-of-range positions never index out of bounds.
pub fn char_of_pos(text: RopeSlice, pos: Position) -> CharIdx {
	let line = pos.line.min(text.len_lines().saturating_sub(1));
	text.line_to_char(line) + pos.ch.min(line_content_len(text, line))
}

/// Converts an absolute char index back to a line/column position.
pub fn pos_of_char(text: RopeSlice, idx: CharIdx) -> Position {
	let idx = idx.min(text.len_chars());
	let line = text.char_to_line(idx);
	Position::new(line, idx - text.line_to_char(line))
}
