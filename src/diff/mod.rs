//! Line-based diff of two policy documents
//!
//! [`diff`] aligns two texts line by line with a minimal edit script
//! and tags each line as context, added or removed. [`unified_diff`] renders the
//! same alignment as unified-diff text with hunk headers.

mod align;
mod unified;

use serde::Serialize;

pub use unified::{unified_diff, DEFAULT_CONTEXT};

/// Role of a line in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    Context,
    Added,
    Removed,
}

impl DiffTag {
    /// Unified-diff prefix for the tag
    pub fn prefix(&self) -> char {
        match self {
            DiffTag::Context => ' ',
            DiffTag::Added => '+',
            DiffTag::Removed => '-',
        }
    }

    /// The tag seen from the other side of the comparison
    pub fn swapped(&self) -> DiffTag {
        match self {
            DiffTag::Context => DiffTag::Context,
            DiffTag::Added => DiffTag::Removed,
            DiffTag::Removed => DiffTag::Added,
        }
    }
}

/// One line of a diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub content: String,
}

/// Diffs two texts line by line
///
/// Returns an empty sequence when the texts are line-for-line identical. Swapping
/// the arguments swaps `Added` and `Removed` and leaves everything else in place.
pub fn diff(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    if old_lines == new_lines {
        return Vec::new();
    }

    align::align(&old_lines, &new_lines)
        .into_iter()
        .map(|edit| DiffLine {
            tag: edit.tag,
            content: edit.text.to_string(),
        })
        .collect()
}
