//! LongFile detector

use crate::features::parsing::domain::ParsedTree;
use crate::features::rules::domain::Alert;

/// One alert when the file has more than `limit` lines
pub fn check_file_length(tree: &ParsedTree, limit: usize) -> Option<Alert> {
    let line_count = tree.line_count();
    (line_count > limit).then(|| Alert::long_file(line_count, limit))
}
