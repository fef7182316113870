//! Line alignment of two documents

use super::DiffTag;
use similar::{Algorithm, DiffOp, TextDiff};

/// One step of an alignment
///
/// `old` and `new` are the cursors into each side when the step is taken; for a
/// context line they are the indices of the shared line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edit<'a> {
    pub tag: DiffTag,
    pub old: usize,
    pub new: usize,
    pub text: &'a str,
}

/// Aligns two line sequences
///
/// The edit script is a minimal one from Myers' algorithm, which runs in linear
/// space. It is always computed from the lexicographically smaller side to the
/// larger one and mirrored when the inputs arrive the other way round, so swapping
/// the inputs swaps `Added` and `Removed` and changes nothing else.
pub(crate) fn align<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Edit<'a>> {
    if new < old {
        return script(new, old)
            .into_iter()
            .map(|edit| Edit {
                tag: edit.tag.swapped(),
                old: edit.new,
                new: edit.old,
                text: edit.text,
            })
            .collect();
    }
    script(old, new)
}

fn script<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Edit<'a>> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(old, new);

    let mut edits = Vec::with_capacity(old.len().max(new.len()));
    let mut run = ChangeRun::default();

    for op in diff.ops() {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                run.flush(old, new, &mut edits);
                for offset in 0..len {
                    edits.push(Edit {
                        tag: DiffTag::Context,
                        old: old_index + offset,
                        new: new_index + offset,
                        text: old[old_index + offset],
                    });
                }
            }
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => run.extend(old_index, old_len, new_index, 0),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => run.extend(old_index, 0, new_index, new_len),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => run.extend(old_index, old_len, new_index, new_len),
        }
    }
    run.flush(old, new, &mut edits);

    edits
}

/// Adjacent non-equal ops, merged until the next equal block
#[derive(Debug, Default)]
struct ChangeRun {
    start: Option<(usize, usize)>,
    old_len: usize,
    new_len: usize,
}

impl ChangeRun {
    fn extend(&mut self, old_index: usize, old_len: usize, new_index: usize, new_len: usize) {
        self.start.get_or_insert((old_index, new_index));
        self.old_len += old_len;
        self.new_len += new_len;
    }

    /// Emits the run, interleaving both sides with the smaller line first
    fn flush<'a>(&mut self, old: &[&'a str], new: &[&'a str], edits: &mut Vec<Edit<'a>>) {
        let Some((mut i, mut j)) = self.start.take() else {
            return;
        };
        let (old_end, new_end) = (i + self.old_len, j + self.new_len);
        self.old_len = 0;
        self.new_len = 0;

        while i < old_end || j < new_end {
            let removed = j == new_end || (i < old_end && old[i] <= new[j]);
            if removed {
                edits.push(Edit {
                    tag: DiffTag::Removed,
                    old: i,
                    new: j,
                    text: old[i],
                });
                i += 1;
            } else {
                edits.push(Edit {
                    tag: DiffTag::Added,
                    old: i,
                    new: j,
                    text: new[j],
                });
                j += 1;
            }
        }
    }
}
