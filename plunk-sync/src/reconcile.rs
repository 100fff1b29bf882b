//! File-set reconciliation.
//!
//! Brings a stored file list in line with an incoming [`FileSet`] and records
//! every difference in a [`ChangeSet`]:
//!
//! 1. Deletion pass — stored files missing from the incoming set are removed
//!    and recorded as `None`.
//! 2. Upsert pass — in incoming key order, unchanged files are skipped,
//!    changed files are overwritten in place, new files are appended. Both
//!    are recorded with their new content.
//!
//! Stored order is preserved for surviving files; filenames stay unique.

use plunk_core::{ChangeSet, FileSet, TutorialFile};

/// Apply `incoming` to `files` in place and return what changed.
pub fn reconcile(files: &mut Vec<TutorialFile>, incoming: &FileSet) -> ChangeSet {
    let mut changes = ChangeSet::new();

    files.retain(|file| {
        let keep = incoming.contains_key(&file.filename);
        if !keep {
            changes.insert(file.filename.clone(), None);
        }
        keep
    });

    for (name, new_file) in incoming {
        match files.iter_mut().find(|f| &f.filename == name) {
            Some(existing) if existing.content == new_file.content => continue,
            Some(existing) => existing.content = new_file.content.clone(),
            None => files.push(TutorialFile::new(name.clone(), new_file.content.clone())),
        }
        changes.insert(
            name.clone(),
            Some(TutorialFile::new(name.clone(), new_file.content.clone())),
        );
    }

    changes
}

/// The change set [`reconcile`] would produce, without touching `files`.
pub fn pending_changes(files: &[TutorialFile], incoming: &FileSet) -> ChangeSet {
    let mut scratch = files.to_vec();
    reconcile(&mut scratch, incoming)
}

#[cfg(test)]
mod tests {
    use plunk_core::file_set;

    use super::*;

    fn stored(pairs: &[(&str, &str)]) -> Vec<TutorialFile> {
        pairs
            .iter()
            .map(|(n, c)| TutorialFile::new(*n, *c))
            .collect()
    }

    #[test]
    fn deletion_is_recorded_as_none() {
        let mut files = stored(&[("a.txt", "1"), ("b.txt", "2")]);
        let changes = reconcile(&mut files, &file_set([("a.txt", "1")]));

        assert_eq!(files, stored(&[("a.txt", "1")]));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("b.txt"), Some(&None));
    }

    #[test]
    fn upsert_overwrites_and_appends() {
        let mut files = stored(&[("a.txt", "1")]);
        let changes = reconcile(&mut files, &file_set([("a.txt", "2"), ("c.txt", "3")]));

        assert_eq!(files, stored(&[("a.txt", "2"), ("c.txt", "3")]));
        assert_eq!(
            changes.get("a.txt"),
            Some(&Some(TutorialFile::new("a.txt", "2")))
        );
        assert_eq!(
            changes.get("c.txt"),
            Some(&Some(TutorialFile::new("c.txt", "3")))
        );
    }

    #[test]
    fn unchanged_files_produce_no_changes() {
        let mut files = stored(&[("a.txt", "1"), ("b.txt", "2")]);
        let incoming = file_set([("b.txt", "2"), ("a.txt", "1")]);
        assert!(reconcile(&mut files, &incoming).is_empty());
        assert_eq!(files, stored(&[("a.txt", "1"), ("b.txt", "2")]));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let mut files = stored(&[("old.txt", "x")]);
        let incoming = file_set([("a.txt", "1"), ("b.txt", "2")]);
        assert_eq!(reconcile(&mut files, &incoming).len(), 3);
        assert!(reconcile(&mut files, &incoming).is_empty());
    }

    #[test]
    fn empty_incoming_deletes_everything() {
        let mut files = stored(&[("a.txt", "1"), ("b.txt", "2")]);
        let changes = reconcile(&mut files, &FileSet::new());
        assert!(files.is_empty());
        assert!(changes.values().all(Option::is_none));
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn survivors_keep_stored_order() {
        let mut files = stored(&[("z.txt", "1"), ("m.txt", "2"), ("a.txt", "3")]);
        reconcile(
            &mut files,
            &file_set([("a.txt", "3"), ("z.txt", "1"), ("b.txt", "new")]),
        );
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["z.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn pending_changes_does_not_mutate() {
        let files = stored(&[("a.txt", "1")]);
        let changes = pending_changes(&files, &file_set([("a.txt", "2")]));
        assert_eq!(changes.len(), 1);
        assert_eq!(files, stored(&[("a.txt", "1")]));
    }
}
