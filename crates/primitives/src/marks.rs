//! Live marks: ranges that stay attached to their text as the document is
//! edited.
//!
//! A [`MarkSet`] is the engine's "stable span" primitive. The owner remaps
//! the set through every [`ChangeSet`](crate::transaction::ChangeSet) it
//! applies; a mark whose span is edited away is invalidated and dropped
//! rather than kept as a zero-width ghost.

use std::ops::Range;

use crate::position::CharIdx;
use crate::transaction::{Bias, ChangeSet};

/// Identifies a mark within a [`MarkSet`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkId(u64);

/// Display attributes carried by a mark, opaque to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkAttributes {
	/// CSS-style class name attached to the marked span.
	pub class: String,
}

#[derive(Debug, Clone)]
struct Mark {
	id: MarkId,
	range: Range<CharIdx>,
	attributes: MarkAttributes,
}

/// An ordered store of live ranges remapped through every edit.
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
	marks: Vec<Mark>,
	next_id: u64,
}

impl MarkSet {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a mark over `range` and returns its handle.
	pub fn insert(&mut self, range: Range<CharIdx>, attributes: MarkAttributes) -> MarkId {
		let id = MarkId(self.next_id);
		self.next_id += 1;
		self.marks.push(Mark { id, range, attributes });
		id
	}

	/// The current span of a mark, or [`None`] once it has been invalidated
	/// or removed.
	pub fn find(&self, id: MarkId) -> Option<Range<CharIdx>> {
		self.marks.iter().find(|mark| mark.id == id).map(|mark| mark.range.clone())
	}

	/// The attributes of a live mark.
	pub fn attributes(&self, id: MarkId) -> Option<&MarkAttributes> {
		self.marks.iter().find(|mark| mark.id == id).map(|mark| &mark.attributes)
	}

	/// Removes a mark. Removing an unknown or already-invalidated id is a
	/// no-op.
	pub fn remove(&mut self, id: MarkId) {
		self.marks.retain(|mark| mark.id != id);
	}

	/// Removes every mark.
	pub fn clear(&mut self) {
		self.marks.clear();
	}

	/// Number of live marks.
	pub fn len(&self) -> usize {
		self.marks.len()
	}

	/// True when no marks are live.
	pub fn is_empty(&self) -> bool {
		self.marks.is_empty()
	}

	/// Remaps every mark through `changes`.
	///
	/// Starts map with [`Bias::Left`] and ends with [`Bias::Right`], so text
	/// inserted at either boundary grows the mark. A mark whose span
	/// collapses to empty is dropped.
	pub fn map_through(&mut self, changes: &ChangeSet) {
		self.marks.retain_mut(|mark| {
			let start = changes.map_pos(mark.range.start, Bias::Left);
			let end = changes.map_pos(mark.range.end, Bias::Right).max(start);
			mark.range = start..end;
			start < end
		});
	}
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;
	use crate::transaction::{Change, Transaction};

	fn tx(doc: &str, start: usize, end: usize, replacement: Option<&str>) -> Transaction {
		let doc = Rope::from(doc);
		Transaction::change(
			doc.slice(..),
			vec![Change {
				start,
				end,
				replacement: replacement.map(str::to_string),
			}],
		)
	}

	#[test]
	fn find_round_trips_inserted_range() {
		let mut marks = MarkSet::new();
		let id = marks.insert(3..4, MarkAttributes::default());
		assert_eq!(marks.find(id), Some(3..4));
	}

	#[test]
	fn insertion_before_mark_shifts_it() {
		let mut marks = MarkSet::new();
		let id = marks.insert(3..4, MarkAttributes::default());
		marks.map_through(tx("abcdef", 0, 0, Some("xx")).changes());
		assert_eq!(marks.find(id), Some(5..6));
	}

	#[test]
	fn insertion_after_mark_leaves_it() {
		let mut marks = MarkSet::new();
		let id = marks.insert(1..2, MarkAttributes::default());
		marks.map_through(tx("abcdef", 5, 5, Some("xx")).changes());
		assert_eq!(marks.find(id), Some(1..2));
	}

	#[test]
	fn replacement_of_marked_span_grows_the_mark() {
		let mut marks = MarkSet::new();
		let id = marks.insert(2..3, MarkAttributes::default());
		marks.map_through(tx("abcdef", 2, 3, Some("long")).changes());
		assert_eq!(marks.find(id), Some(2..6));
	}

	#[test]
	fn deletion_of_marked_span_invalidates_the_mark() {
		let mut marks = MarkSet::new();
		let id = marks.insert(2..3, MarkAttributes::default());
		let other = marks.insert(4..5, MarkAttributes::default());
		marks.map_through(tx("abcdef", 1, 4, None).changes());
		assert_eq!(marks.find(id), None);
		assert_eq!(marks.find(other), Some(1..2));
		assert_eq!(marks.len(), 1);
	}

	#[test]
	fn remove_and_clear_are_idempotent() {
		let mut marks = MarkSet::new();
		let id = marks.insert(0..1, MarkAttributes::default());
		marks.remove(id);
		marks.remove(id);
		assert!(marks.is_empty());
		marks.clear();
		marks.clear();
	}

	#[test]
	fn attributes_follow_the_mark() {
		let mut marks = MarkSet::new();
		let id = marks.insert(0..1, MarkAttributes { class: "stop0".into() });
		assert_eq!(marks.attributes(id).map(|attrs| attrs.class.as_str()), Some("stop0"));
		marks.remove(id);
		assert_eq!(marks.attributes(id), None);
	}
}
