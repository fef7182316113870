//! Unified-diff rendering

use super::align::{align, Edit};
use super::DiffTag;

/// Lines of unchanged context around each hunk
pub const DEFAULT_CONTEXT: usize = 3;

/// Renders the line diff of two texts in unified format
///
/// The output starts with the `---`/`+++` label pair followed by `@@` hunks. Inside
/// a change run removals are listed before additions. Identical texts produce an
/// empty vector.
///
/// # Example
///
/// ```
/// use robots_lens::diff::unified_diff;
///
/// let lines = unified_diff("a\nb", "a\nc", "Version 1", "Version 2", 3);
/// assert_eq!(lines, ["--- Version 1", "+++ Version 2", "@@ -1,2 +1,2 @@", " a", "-b", "+c"]);
/// ```
pub fn unified_diff(old: &str, new: &str, from_label: &str, to_label: &str, context: usize) -> Vec<String> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    if old_lines == new_lines {
        return Vec::new();
    }

    let edits = align(&old_lines, &new_lines);
    let mut output = vec![format!("--- {}", from_label), format!("+++ {}", to_label)];
    for (start, end) in hunk_ranges(&edits, context) {
        render_hunk(&edits[start..end], &mut output);
    }
    output
}

/// Splits an alignment into hunks
///
/// Changes separated by more than `2 * context` unchanged lines go into
/// separate hunks.
fn hunk_ranges(edits: &[Edit<'_>], context: usize) -> Vec<(usize, usize)> {
    let mut changes = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| edit.tag != DiffTag::Context)
        .map(|(idx, _)| idx);

    let mut ranges = Vec::new();
    let Some(first) = changes.next() else {
        return ranges;
    };

    let mut start = first.saturating_sub(context);
    let mut last = first;
    for idx in changes {
        if idx - last - 1 > 2 * context {
            ranges.push((start, (last + context + 1).min(edits.len())));
            start = idx - context;
        }
        last = idx;
    }
    ranges.push((start, (last + context + 1).min(edits.len())));
    ranges
}

fn render_hunk(hunk: &[Edit<'_>], output: &mut Vec<String>) {
    let Some(first) = hunk.first() else {
        return;
    };
    let old_len = hunk.iter().filter(|e| e.tag != DiffTag::Added).count();
    let new_len = hunk.iter().filter(|e| e.tag != DiffTag::Removed).count();
    output.push(format!(
        "@@ -{} +{} @@",
        format_range(first.old, old_len),
        format_range(first.new, new_len)
    ));

    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();
    for edit in hunk {
        match edit.tag {
            DiffTag::Context => {
                flush_changes(&mut removed, &mut added, output);
                output.push(format!("{}{}", DiffTag::Context.prefix(), edit.text));
            }
            DiffTag::Removed => removed.push(edit.text),
            DiffTag::Added => added.push(edit.text),
        }
    }
    flush_changes(&mut removed, &mut added, output);
}

fn flush_changes(removed: &mut Vec<&str>, added: &mut Vec<&str>, output: &mut Vec<String>) {
    output.extend(removed.drain(..).map(|line| format!("{}{}", DiffTag::Removed.prefix(), line)));
    output.extend(added.drain(..).map(|line| format!("{}{}", DiffTag::Added.prefix(), line)));
}

/// Formats a hunk range as `start,length` with 1-based starts
///
/// A single line omits the length; an empty range points at the line before it.
fn format_range(start: usize, length: usize) -> String {
    match length {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}
