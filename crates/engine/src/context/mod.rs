//! Block-structure context detection near the cursor.
//!
//! These are lightweight, backward-bounded scans, not a Markdown parser:
//! they only need to be right near the cursor. All detectors are pure and
//! total - malformed or ambiguous input resolves to "not in this context",
//! never to an error.

mod block;
mod callout;
mod front_matter;

pub use block::{BlockType, is_in_math_block, is_in_math_or_code_block, unclosed_block_type};
pub use callout::{BlockquotePrefix, CalloutHeader, HeaderSpan, blockquote_prefix, callout_header};
pub use front_matter::is_in_front_matter;
