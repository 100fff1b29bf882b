//! Zip packaging of tutorial files.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use plunk_core::TutorialFile;

use crate::error::{io_err, SyncError};

/// Build an in-memory zip with one entry per file, in the given order.
///
/// Entry timestamps are pinned so the same file list always yields the same
/// bytes.
pub fn package(files: &[TutorialFile]) -> Result<Vec<u8>, SyncError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for file in files {
        writer.start_file(file.filename.as_str(), options)?;
        writer
            .write_all(file.content.as_bytes())
            .map_err(|e| io_err(&file.filename, e))?;
    }
    Ok(writer.finish()?.into_inner())
}
