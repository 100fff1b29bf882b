//! Domain types for tutorial plunks.
//!
//! A [`TutorialRecord`] is the local mirror of one remote plunk: the files the
//! tutorial ships plus the id the remote service assigned on creation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier assigned to a plunk by the remote service.
///
/// Ids beginning with [`RemoteId::STUB_PREFIX`] were synthesized locally while
/// remote calls were disabled; no remote resource exists for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(pub String);

impl RemoteId {
    /// Reserved marker for locally generated ids.
    pub const STUB_PREFIX: &'static str = "_[stub]_";

    /// Synthesize a fresh stub id. Never collides with a remote-assigned id.
    pub fn stub() -> Self {
        Self(format!(
            "{}{}",
            Self::STUB_PREFIX,
            uuid::Uuid::new_v4().simple()
        ))
    }

    pub fn is_stub(&self) -> bool {
        self.0.starts_with(Self::STUB_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RemoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RemoteId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A single named text file inside a plunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialFile {
    pub filename: String,
    pub content: String,
}

impl TutorialFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Incoming file set keyed by filename. Presence means "should exist with
/// this content".
pub type FileSet = BTreeMap<String, TutorialFile>;

/// Pending changes accumulated during reconciliation: `None` marks a deletion.
///
/// Serializes to the remote update payload shape
/// (`{"a.txt": {"filename": …, "content": …}, "gone.txt": null}`).
pub type ChangeSet = BTreeMap<String, Option<TutorialFile>>;

/// Build a [`FileSet`] from `(filename, content)` pairs.
pub fn file_set<I, N, C>(pairs: I) -> FileSet
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, content)| {
            let file = TutorialFile::new(name, content);
            (file.filename.clone(), file)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Local state of a tutorial plunk.
///
/// Deserializing from an arbitrary data object picks up only the four fields
/// below; anything else is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialRecord {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub web_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteId>,
    #[serde(default)]
    pub files: Vec<TutorialFile>,
}

impl TutorialRecord {
    pub fn new(
        description: impl Into<String>,
        web_path: impl Into<String>,
        remote_id: Option<RemoteId>,
        files: Vec<TutorialFile>,
    ) -> Self {
        Self {
            description: description.into(),
            web_path: web_path.into(),
            remote_id,
            files,
        }
    }

    /// Stored file with the given name, if any.
    pub fn file(&self, filename: &str) -> Option<&TutorialFile> {
        self.files.iter().find(|f| f.filename == filename)
    }

    /// `true` when a real (non-stub) remote plunk backs this record.
    pub fn has_remote(&self) -> bool {
        self.remote_id.as_ref().is_some_and(|id| !id.is_stub())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_ids_carry_prefix_and_differ() {
        let a = RemoteId::stub();
        let b = RemoteId::stub();
        assert!(a.is_stub());
        assert!(a.as_str().starts_with("_[stub]_"));
        assert_ne!(a, b);
    }

    #[test]
    fn real_id_is_not_stub() {
        assert!(!RemoteId::from("Xk3a9qB").is_stub());
    }

    #[test]
    fn extraneous_fields_are_dropped() {
        let json = r#"{
            "description": "Closures",
            "webPath": "closure",
            "remoteId": "abc",
            "files": [{"filename": "index.html", "content": "<p>"}],
            "title": "ignored",
            "_id": 42
        }"#;
        let record: TutorialRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            record,
            TutorialRecord::new(
                "Closures",
                "closure",
                Some(RemoteId::from("abc")),
                vec![TutorialFile::new("index.html", "<p>")],
            )
        );
        let back = serde_json::to_value(&record).expect("serialize");
        let keys: Vec<_> = back.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn files_default_to_empty() {
        let record: TutorialRecord =
            serde_json::from_str(r#"{"description": "d", "webPath": "w"}"#).expect("deserialize");
        assert!(record.files.is_empty());
        assert!(record.remote_id.is_none());
    }

    #[test]
    fn has_remote_ignores_stub_ids() {
        let mut record = TutorialRecord::new("d", "w", None, vec![]);
        assert!(!record.has_remote());
        record.remote_id = Some(RemoteId::stub());
        assert!(!record.has_remote());
        record.remote_id = Some(RemoteId::from("real"));
        assert!(record.has_remote());
    }

    #[test]
    fn change_set_serializes_deletions_as_null() {
        let mut changes = ChangeSet::new();
        changes.insert("gone.txt".into(), None);
        changes.insert("a.txt".into(), Some(TutorialFile::new("a.txt", "1")));
        let json = serde_json::to_string(&changes).expect("serialize");
        assert_eq!(
            json,
            r#"{"a.txt":{"filename":"a.txt","content":"1"},"gone.txt":null}"#
        );
    }
}
