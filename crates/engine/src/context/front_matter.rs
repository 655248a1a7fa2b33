use vellum_primitives::Position;

use crate::buffer::Buffer;

const DELIMITER: &str = "---";

/// Minimum number of lines scanned for the closing delimiter.
const MIN_SCAN_LINES: usize = 30;

/// Whether `pos` sits inside the document's YAML front matter block.
///
/// Line 0 must be exactly the `---` delimiter and line 1 must not be - an
/// empty front matter block would otherwise be treated as containing
/// everything after it. The block ends at the first later delimiter line;
/// if none exists within the scan window, `pos` is not inside.
pub fn is_in_front_matter(buffer: &Buffer, pos: Position) -> bool {
	if buffer.line(0) != DELIMITER || buffer.line(1) == DELIMITER || pos.line == 0 {
		return false;
	}

	for i in 2..MIN_SCAN_LINES.max(buffer.last_line()) {
		if buffer.line(i) == DELIMITER {
			return pos.line < i;
		}
	}
	false
}
