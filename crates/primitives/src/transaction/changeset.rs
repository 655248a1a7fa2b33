use ropey::Rope;

use super::Bias;
use crate::position::{CharIdx, CharLen};

/// A sequence of retain/delete/insert operations describing one edit.
///
/// The operation encoding keeps enough information to both apply the edit to
/// a rope and to map any pre-edit position to its post-edit location, which
/// is all the engine needs: there is no undo stack here, so changesets are
/// never inverted or composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
	operations: Vec<Operation>,
	/// Document length before the edit.
	len: CharLen,
	/// Document length after the edit.
	len_after: CharLen,
}

/// One atomic step of a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Keep the next `n` characters of the source document.
	Retain(CharLen),
	/// Drop the next `n` characters of the source document.
	Delete(CharLen),
	/// Insert new text at the current position.
	Insert {
		/// The inserted text.
		text: String,
		/// Cached `text.chars().count()`.
		len: CharLen,
	},
}

impl ChangeSet {
	/// Length of the source document.
	pub fn len(&self) -> CharLen {
		self.len
	}

	/// Length of the document after applying the edit.
	pub fn len_after(&self) -> CharLen {
		self.len_after
	}

	/// True when the changeset contains no operations.
	pub fn is_empty(&self) -> bool {
		self.operations.is_empty()
	}

	/// The operations in source order.
	pub fn operations(&self) -> &[Operation] {
		&self.operations
	}

	/// Keeps `n` characters. Consecutive retains merge.
	pub(super) fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;
		if let Some(Operation::Retain(count)) = self.operations.last_mut() {
			*count += n;
		} else {
			self.operations.push(Operation::Retain(n));
		}
	}

	/// Drops `n` characters. Consecutive deletes merge.
	pub(super) fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		if let Some(Operation::Delete(count)) = self.operations.last_mut() {
			*count += n;
		} else {
			self.operations.push(Operation::Delete(n));
		}
	}

	/// Inserts `text` at the current position.
	///
	/// An insert directly after a delete is reordered before it, so that a
	/// replacement always reads insert-then-delete; position mapping relies
	/// on this to treat the replaced span's end as sitting after the new
	/// text.
	pub(super) fn insert(&mut self, text: String) {
		if text.is_empty() {
			return;
		}

		let added = text.chars().count();
		self.len_after += added;
		match self.operations.as_mut_slice() {
			[.., Operation::Insert { text: prev, len }] | [.., Operation::Insert { text: prev, len }, Operation::Delete(_)] => {
				prev.push_str(&text);
				*len += added;
			}
			[.., last @ Operation::Delete(_)] => {
				let delete = std::mem::replace(last, Operation::Insert { text, len: added });
				self.operations.push(delete);
			}
			_ => {
				self.operations.push(Operation::Insert { text, len: added });
			}
		}
	}

	/// Applies the edit to `doc`, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		let mut pos = 0;
		for op in &self.operations {
			match op {
				Operation::Retain(n) => pos += n,
				Operation::Delete(n) => doc.remove(pos..pos + n),
				Operation::Insert { text, len } => {
					doc.insert(pos, text);
					pos += len;
				}
			}
		}
	}

	/// Maps a pre-edit position to its post-edit location.
	///
	/// `bias` decides which side of an insertion a position sitting exactly
	/// on the insertion point lands on. Positions inside a deleted span map
	/// to the deletion point.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;
		for op in &self.operations {
			if old_pos > pos {
				break;
			}

			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert { len, .. } => {
					if old_pos != pos || bias == Bias::Right {
						new_pos += len;
					}
				}
			}
		}

		new_pos + (pos - old_pos)
	}
}
