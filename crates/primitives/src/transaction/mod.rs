//! Document transactions.
//!
//! A [`Transaction`] bundles one or more non-overlapping text replacements
//! into a single [`ChangeSet`] that can be applied to a rope and used to map
//! positions from before the edit to after it. Position mapping is what keeps
//! live marks attached to their text while the document changes around them.

use ropey::{Rope, RopeSlice};

use crate::position::CharIdx;

pub use changeset::{ChangeSet, Operation};

mod changeset;
#[cfg(test)]
mod tests;

/// A single text replacement: `[start, end)` replaced by `replacement`.
///
/// `None` as the replacement is a plain deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// Starting character index of the replaced span.
	pub start: CharIdx,
	/// Ending character index of the replaced span (exclusive).
	pub end: CharIdx,
	/// The new text, or [`None`] for deletion.
	pub replacement: Option<String>,
}

/// How positions sitting exactly on an insertion point are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// The position stays before text inserted at its location.
	Left,
	/// The position moves after text inserted at its location.
	Right,
}

/// A set of changes applied to a document as one edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
	changes: ChangeSet,
}

impl Transaction {
	/// Builds a transaction from replace triples against `doc`.
	///
	/// Changes are sorted by position; spans are clamped to the document and
	/// a change overlapping an earlier one is dropped rather than applied
	/// twice.
	pub fn change(doc: RopeSlice, mut changes: Vec<Change>) -> Self {
		changes.sort_by_key(|change| (change.start, change.end));

		let len = doc.len_chars();
		let mut set = ChangeSet::default();
		let mut last = 0;
		for Change { start, end, replacement } in changes {
			let start = start.min(len);
			let end = end.min(len).max(start);
			if start < last {
				continue;
			}

			set.retain(start - last);
			if let Some(text) = replacement {
				set.insert(text);
			}
			set.delete(end - start);
			last = end;
		}
		set.retain(len - last);

		Self { changes: set }
	}

	/// The underlying changeset, used for position mapping.
	pub fn changes(&self) -> &ChangeSet {
		&self.changes
	}

	/// Applies this transaction to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		self.changes.apply(doc);
	}
}
