//! Error types for plunk-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote answered 404 on a create/update call.
    #[error(
        "request to {url} returned 404: the session token is probably stale, \
         or this plunk does not belong to the token's user"
    )]
    StaleCredentialOrOwnership { url: String },

    /// Remote answered 400: the JSON body was rejected.
    #[error("request to {url} returned 400: the request body is not valid plunk JSON")]
    MalformedRequest { url: String },

    /// Remote answered with anything but the single expected success code.
    #[error("unexpected status {code} from plunk API (expected {expected}): {body}")]
    UnexpectedRemoteStatus {
        expected: u16,
        code: u16,
        body: String,
    },

    /// Connection, DNS, TLS or timeout failure before a status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// Success status, but the body is not what the API documents.
    #[error("invalid plunk API response: {0}")]
    InvalidResponse(String),

    /// Zip archive construction failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tutorial source file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 text")]
    NonUtf8 { path: PathBuf },

    /// JSON serialization/deserialization error (request/response bodies).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
