//! Dry-run unified diff support for `plunk diff` and `plunk sync --dry-run`.

use similar::TextDiff;

use plunk_core::{FileSet, TutorialRecord};

use crate::reconcile::pending_changes;

/// How a file would change on the next push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

/// A single pending file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub filename: String,
    pub kind: ChangeKind,
    pub unified_diff: String,
}

/// Diff what reconciling `incoming` into `record` would change.
///
/// The record is not modified. Results follow the change set's key order.
pub fn diff_record(record: &TutorialRecord, incoming: &FileSet) -> Vec<FileDiff> {
    pending_changes(&record.files, incoming)
        .into_iter()
        .map(|(filename, change)| {
            let existing = record.file(&filename).map(|f| f.content.as_str());
            let (kind, old, new) = match (&change, existing) {
                (None, old) => (ChangeKind::Deleted, old.unwrap_or(""), ""),
                (Some(file), Some(old)) => (ChangeKind::Modified, old, file.content.as_str()),
                (Some(file), None) => (ChangeKind::Added, "", file.content.as_str()),
            };

            let old_header = format!("a/{filename}");
            let new_header = format!("b/{filename}");
            let unified_diff = TextDiff::from_lines(old, new)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string();

            FileDiff {
                filename,
                kind,
                unified_diff,
            }
        })
        .collect()
}
