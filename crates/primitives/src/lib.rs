#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core text primitives for the completion engine: positions, transactions,
//! and live marks that stay attached to their text as the document is edited.

/// Live marks remapped through document edits.
pub mod marks;
/// Line/column positions and char-index conversions.
pub mod position;
/// OT-style changesets with position mapping.
pub mod transaction;

pub use marks::{MarkAttributes, MarkId, MarkSet};
pub use position::{CharIdx, CharLen, Position, char_of_pos, line_content_len, pos_of_char};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, Change, ChangeSet, Transaction};
