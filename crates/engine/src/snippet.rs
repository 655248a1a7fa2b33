//! Snippet tab-stop placeholders: creation, cycling, and cleanup.
//!
//! A replacement string may carry `#` tab-stop markers and `~`
//! delete-after-insert markers. Each `#` becomes a one-character placeholder
//! anchored in the buffer's mark store, colored from a small palette, and
//! visited in creation order. Marks remap through every edit, so
//! placeholders survive arbitrary concurrent changes; a placeholder whose
//! text is edited away is pruned, never kept as a zero-width ghost.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use tracing::warn;
use vellum_primitives::{MarkAttributes, MarkId, Position};

use crate::buffer::Buffer;
use crate::provider::{DELETE_CHAR, PLACEHOLDER_CHAR};

/// Display colors for placeholder highlights.
///
/// Palette indices stay unique across live placeholders while any index is
/// free.
pub const PLACEHOLDER_COLORS: [&str; 7] = [
	"lightskyblue",
	"orange",
	"lime",
	"pink",
	"cornsilk",
	"magenta",
	"navajowhite",
];

/// A live tab-stop placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
	mark: MarkId,
	/// Index into [`PLACEHOLDER_COLORS`].
	pub color_index: usize,
	/// Monotonic creation counter, for display purposes.
	pub insertion_order: u64,
}

impl Placeholder {
	/// The mark anchoring this placeholder's live range.
	pub fn mark(&self) -> MarkId {
		self.mark
	}
}

/// Tracks the live placeholders left behind by snippet insertions.
///
/// Index 0 is always the most recently created placeholder - the next one a
/// Tab/Enter press consumes.
#[derive(Debug, Clone, Default)]
pub struct SnippetManager {
	placeholders: Vec<Placeholder>,
	created: u64,
}

impl SnippetManager {
	/// Creates a manager with no live placeholders.
	pub fn new() -> Self {
		Self::default()
	}

	/// Processes the snippet markers of a replacement just inserted at
	/// `start`.
	///
	/// Lines are scanned bottom-to-top and each line right-to-left, so the
	/// placeholder selected first is the last `#` in the text - the stop
	/// closest to where typing continues. A `~` deletes itself and moves the
	/// cursor there instead of creating a stop. All stops from one call
	/// share a color.
	pub fn handle_snippet(&mut self, value: &str, start: Position, buffer: &mut Buffer) {
		let color_index = self.next_color_index();
		let lines: Vec<&str> = value.split('\n').collect();

		for (line_index, line) in lines.iter().enumerate().rev() {
			let chars: Vec<char> = line.chars().collect();
			for i in (0..chars.len()).rev() {
				let c = chars[i];
				if c != PLACEHOLDER_CHAR && c != DELETE_CHAR {
					continue;
				}

				let line_base = if line_index == 0 { start.ch } else { 0 };
				let pos = Position::new(start.line + line_index, line_base + i);
				if c == DELETE_CHAR {
					buffer.set_cursor(pos);
					buffer.replace_range("", pos, pos.with_ch(pos.ch + 1));
					continue;
				}

				let mark = buffer.mark_range(
					pos,
					pos.with_ch(pos.ch + 1),
					MarkAttributes {
						class: format!("vellum-suggestion-placeholder{color_index}"),
					},
				);
				self.placeholders.insert(
					0,
					Placeholder {
						mark,
						color_index,
						insertion_order: self.created,
					},
				);
				self.created += 1;
			}
		}

		if let Some(&front) = self.placeholders.first() {
			Self::select_placeholder(front, buffer);
		}
	}

	/// Consumes the front placeholder and advances to the next one.
	///
	/// Returns false once no placeholder is left - the caller falls back to
	/// the default key behavior. When the consumed stop was nested inside
	/// the next one, the cursor just moves to that range's end instead of
	/// re-selecting the whole enclosing span.
	pub fn consume_and_goto_next_marker(&mut self, buffer: &mut Buffer) -> bool {
		if self.placeholders.is_empty() {
			return false;
		}
		let old = self.placeholders.remove(0);
		let old_range = buffer.find_mark(old.mark);
		buffer.remove_mark(old.mark);

		let Some(&next) = self.placeholders.first() else {
			return false;
		};
		let Some((from, to)) = buffer.find_mark(next.mark) else {
			return false;
		};

		match old_range {
			Some((old_from, old_to)) if from <= old_from && to >= old_to => buffer.set_cursor(to),
			_ => Self::select_placeholder(next, buffer),
		}
		true
	}

	/// Returns the placeholder containing `pos`, most recent first.
	///
	/// As a side effect, placeholders whose marks were edited away are
	/// pruned from the list.
	pub fn placeholder_at_pos(&mut self, buffer: &Buffer, pos: Position) -> Option<Placeholder> {
		let mut found = None;
		let mut i = 0;
		while i < self.placeholders.len() {
			let placeholder = self.placeholders[i];
			let Some((from, to)) = buffer.find_mark(placeholder.mark) else {
				self.placeholders.remove(i);
				continue;
			};
			if found.is_none() && from <= pos && pos <= to {
				found = Some(placeholder);
			}
			i += 1;
		}
		found
	}

	/// Removes every placeholder and its mark. Idempotent.
	pub fn clear_all_placeholders(&mut self, buffer: &mut Buffer) {
		for placeholder in self.placeholders.drain(..) {
			buffer.remove_mark(placeholder.mark);
		}
	}

	/// Number of live placeholders.
	pub fn len(&self) -> usize {
		self.placeholders.len()
	}

	/// True when no placeholder is live.
	pub fn is_empty(&self) -> bool {
		self.placeholders.is_empty()
	}

	/// The live placeholders, most recent first.
	pub fn placeholders(&self) -> &[Placeholder] {
		&self.placeholders
	}

	/// The smallest palette index unused by any live placeholder.
	///
	/// An exhausted palette falls back to a pseudo-random index; two live
	/// snippets may then share a color, which is cosmetic and accepted.
	fn next_color_index(&self) -> usize {
		let free = (0..PLACEHOLDER_COLORS.len()).find(|index| {
			!self.placeholders.iter().any(|p| p.color_index == *index)
		});
		free.unwrap_or_else(|| {
			warn!("no colors left for snippet, using random color");
			RandomState::new().hash_one(self.created) as usize % PLACEHOLDER_COLORS.len()
		})
	}

	fn select_placeholder(placeholder: Placeholder, buffer: &mut Buffer) {
		if let Some((from, _)) = buffer.find_mark(placeholder.mark) {
			buffer.set_selection(from, from.with_ch(from.ch + 1));
		}
	}
}
