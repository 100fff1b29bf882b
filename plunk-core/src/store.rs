//! Per-tutorial YAML record store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.plunk/
//!   tutorials/
//!     <key>.yaml   (one file per tutorial — mode 0600)
//! ```
//!
//! `<key>` is derived from the tutorial's web path by [`record_key`].
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::TutorialRecord;

/// A stored tutorial: the record plus store bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialEntry {
    #[serde(flatten)]
    pub record: TutorialRecord,
    pub created_at: DateTime<Utc>,
    /// Time of the last successful push (or no-op check).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

impl TutorialEntry {
    pub fn new(record: TutorialRecord) -> Self {
        Self {
            record,
            created_at: Utc::now(),
            synced_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// Filesystem-safe key for a web path.
///
/// Every `/` becomes `__`. ASCII letters, digits, `-` and non-leading `.`
/// are kept; every other byte (including `_`) is written as `%XX`. Underscores
/// therefore only ever appear in pairs, which keeps distinct web paths on
/// distinct keys. The empty web path maps to the lone `_`.
pub fn record_key(web_path: &str) -> String {
    if web_path.is_empty() {
        return "_".to_string();
    }
    let mut key = String::with_capacity(web_path.len());
    for (i, byte) in web_path.bytes().enumerate() {
        match byte {
            b'/' => key.push_str("__"),
            b'.' if i > 0 => key.push('.'),
            b'-' => key.push('-'),
            b if b.is_ascii_alphanumeric() => key.push(char::from(b)),
            b => key.push_str(&format!("%{b:02X}")),
        }
    }
    key
}

/// `<home>/.plunk/tutorials/`
///
/// Creates the directory (mode `0700`) if it does not yet exist.
pub fn tutorials_dir_at(home: &Path) -> Result<PathBuf, StoreError> {
    let dir = home.join(".plunk").join("tutorials");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

/// `<home>/.plunk/tutorials/<key>.yaml` — pure, no I/O.
pub fn record_path_at(home: &Path, web_path: &str) -> PathBuf {
    home.join(".plunk")
        .join("tutorials")
        .join(format!("{}.yaml", record_key(web_path)))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the tutorial stored for `web_path`.
///
/// Returns `StoreError::NotFound` if absent,
/// `StoreError::Parse` (with path + line context) if malformed YAML, and
/// `StoreError::WebPathMismatch` if the file belongs to another web path.
pub fn load_at(home: &Path, web_path: &str) -> Result<TutorialEntry, StoreError> {
    let path = record_path_at(home, web_path);
    if !path.exists() {
        return Err(StoreError::NotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    let entry: TutorialEntry = serde_yaml::from_str(&contents)
        .map_err(|e| StoreError::Parse { path: path.clone(), source: e })?;
    if entry.record.web_path != web_path {
        return Err(StoreError::WebPathMismatch {
            path,
            expected: web_path.to_string(),
            found: entry.record.web_path,
        });
    }
    Ok(entry)
}

/// `load_at` convenience wrapper.
pub fn load(web_path: &str) -> Result<TutorialEntry, StoreError> {
    load_at(&home()?, web_path)
}

/// Every stored tutorial, sorted by key. Skips non-YAML files.
pub fn list_at(home: &Path) -> Result<Vec<TutorialEntry>, StoreError> {
    let dir = home.join(".plunk").join("tutorials");
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            entries.push(entry);
        }
    }
    entries.sort_by_key(|e| e.file_name());

    let mut result = Vec::new();
    for entry in entries {
        let fname = entry.file_name();
        if !fname.to_string_lossy().ends_with(".yaml") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        let tutorial: TutorialEntry = serde_yaml::from_str(&contents)
            .map_err(|e| StoreError::Parse { path: entry.path(), source: e })?;
        result.push(tutorial);
    }
    Ok(result)
}

/// `list_at` convenience wrapper.
pub fn list() -> Result<Vec<TutorialEntry>, StoreError> {
    list_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a tutorial to `<home>/.plunk/tutorials/<key>.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, entry: &TutorialEntry) -> Result<(), StoreError> {
    tutorials_dir_at(home)?;
    let path = record_path_at(home, &entry.record.web_path);
    let tmp_path = path.with_extension("yaml.tmp");

    let yaml = serde_yaml::to_string(entry)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(entry: &TutorialEntry) -> Result<(), StoreError> {
    save_at(&home()?, entry)
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Register a tutorial with no files and no remote plunk.
///
/// Idempotent: if a record already exists for `web_path`, it is loaded and
/// returned unchanged.
pub fn init_at(home: &Path, description: &str, web_path: &str) -> Result<TutorialEntry, StoreError> {
    if record_path_at(home, web_path).exists() {
        return load_at(home, web_path);
    }
    let entry = TutorialEntry::new(TutorialRecord::new(description, web_path, None, vec![]));
    save_at(home, &entry)?;
    Ok(entry)
}

/// `init_at` convenience wrapper.
pub fn init(description: &str, web_path: &str) -> Result<TutorialEntry, StoreError> {
    init_at(&home()?, description, web_path)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
