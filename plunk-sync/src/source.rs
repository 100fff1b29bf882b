//! Collect a tutorial's files from a directory on disk.

use std::path::Path;

use plunk_core::{FileSet, TutorialFile};

use crate::error::{io_err, SyncError};

/// Read every file below `root` into a [`FileSet`].
///
/// Names are `/`-joined paths relative to `root`. Dot-files and
/// dot-directories are skipped, as are symlinks. Content is normalised to LF.
pub fn collect_dir(root: &Path) -> Result<FileSet, SyncError> {
    let mut files = FileSet::new();
    walk(root, root, &mut files)?;
    tracing::debug!("collected {} files from {}", files.len(), root.display());
    Ok(files)
}

fn walk(root: &Path, dir: &Path, out: &mut FileSet) -> Result<(), SyncError> {
    let listing = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut entries = dir_entries(dir, listing)?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            walk(root, &path, out)?;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        let content =
            String::from_utf8(bytes).map_err(|_| SyncError::NonUtf8 { path: path.clone() })?;
        let name = relative_name(root, &path);
        out.insert(
            name.clone(),
            TutorialFile::new(name, normalize_line_endings(&content)),
        );
    }
    Ok(())
}

/// An unreadable entry fails the walk; skipping it would look like a deletion.
fn dir_entries<T>(
    dir: &Path,
    listing: impl IntoIterator<Item = std::io::Result<T>>,
) -> Result<Vec<T>, SyncError> {
    listing
        .into_iter()
        .map(|entry| entry.map_err(|e| io_err(dir, e)))
        .collect()
}

fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn collects_nested_files_with_relative_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<p>").unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css").join("main.css"), "body {}").unwrap();

        let files = collect_dir(dir.path()).unwrap();
        let names: Vec<_> = files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["css/main.css", "index.html"]);
        assert_eq!(files["css/main.css"].filename, "css/main.css");
        assert_eq!(files["css/main.css"].content, "body {}");
    }

    #[test]
    fn skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".DS_Store"), "junk").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("HEAD"), "ref").unwrap();
        fs::write(dir.path().join("app.js"), "1").unwrap();

        let files = collect_dir(dir.path()).unwrap();
        assert_eq!(files.keys().collect::<Vec<_>>(), vec!["app.js"]);
    }

    #[test]
    fn normalizes_crlf() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "line1\r\nline2\r\n").unwrap();
        let files = collect_dir(dir.path()).unwrap();
        assert_eq!(files["a.txt"].content, "line1\nline2\n");
    }

    #[test]
    fn rejects_binary_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), [0x89, 0x50, 0xff, 0xfe]).unwrap();
        let err = collect_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::NonUtf8 { .. }), "got: {err}");
        assert!(err.to_string().contains("logo.png"));
    }

    #[test]
    fn unreadable_entry_fails_the_walk() {
        let listing = vec![
            Ok("a.txt"),
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
            Ok("b.txt"),
        ];
        let err = dir_entries(Path::new("tutorial"), listing).unwrap_err();
        match err {
            SyncError::Io { path, source } => {
                assert_eq!(path, Path::new("tutorial"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn missing_dir_is_io_error_with_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = collect_dir(&missing).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }
}
