//! Plunk HTTP API client.
//!
//! Blocking `ureq` client. Two calls make up the whole wire contract:
//!
//! - create: `POST <api>/plunks/?sessid=<token>` → `201 {"id": …}`
//! - update: `POST <api>/plunks/<id>?sessid=<token>` → `200`
//!
//! [`PlunkClient::send`] never fails on a non-2xx status by itself; it only
//! translates 404 and 400 into descriptive errors. Callers check the success
//! code they expect.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{json, Value};

use plunk_core::{ChangeSet, RemoteId, SyncConfig, TutorialFile};

use crate::error::SyncError;

pub const STATUS_CREATED: u16 = 201;
pub const STATUS_OK: u16 = 200;

const CONTENT_TYPE: &str = "application/json;charset=utf-8";
const SESSION_PARAM: &str = "sessid";

// ---------------------------------------------------------------------------
// API seam
// ---------------------------------------------------------------------------

/// Remote operations the syncer depends on.
pub trait PlunkApi {
    /// Create a private plunk holding `files`; returns the assigned id.
    fn create(
        &self,
        description: &str,
        files: &[TutorialFile],
        token: &str,
    ) -> Result<RemoteId, SyncError>;

    /// Apply `changes` (`None` = delete) to an existing plunk.
    fn update(&self, id: &RemoteId, changes: &ChangeSet, token: &str) -> Result<(), SyncError>;
}

impl<T: PlunkApi + ?Sized> PlunkApi for &T {
    fn create(
        &self,
        description: &str,
        files: &[TutorialFile],
        token: &str,
    ) -> Result<RemoteId, SyncError> {
        (**self).create(description, files, token)
    }

    fn update(&self, id: &RemoteId, changes: &ChangeSet, token: &str) -> Result<(), SyncError> {
        (**self).update(id, changes, token)
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// A fully formed API request.
///
/// `url` never contains the session token. It is attached as the `sessid`
/// query parameter at send time, percent-encoded.
#[derive(Clone, PartialEq)]
pub struct PlunkRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Value,
    session: String,
}

impl fmt::Debug for PlunkRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlunkRequest")
            .field("method", &self.method)
            .field("url", &self.display_url())
            .field("body", &self.body)
            .finish()
    }
}

impl PlunkRequest {
    pub fn create(api_base: &str, description: &str, files: &[TutorialFile], token: &str) -> Self {
        let files: BTreeMap<&str, &TutorialFile> =
            files.iter().map(|f| (f.filename.as_str(), f)).collect();
        Self {
            method: "POST",
            url: format!("{api_base}/plunks/"),
            body: json!({
                "description": description,
                "tags": [],
                "files": files,
                "private": true,
            }),
            session: token.to_string(),
        }
    }

    pub fn update(api_base: &str, id: &RemoteId, changes: &ChangeSet, token: &str) -> Self {
        Self {
            method: "POST",
            url: format!("{api_base}/plunks/{id}"),
            body: json!({ "files": changes }),
            session: token.to_string(),
        }
    }

    /// URL with the session token masked, for logs and error messages.
    pub fn display_url(&self) -> String {
        format!("{}?{SESSION_PARAM}=***", self.url)
    }
}

/// Raw status and body of a response that passed 404/400 translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Fail with [`SyncError::UnexpectedRemoteStatus`] unless `status == expected`.
    pub fn expect_status(&self, expected: u16) -> Result<(), SyncError> {
        if self.status == expected {
            return Ok(());
        }
        Err(SyncError::UnexpectedRemoteStatus {
            expected,
            code: self.status,
            body: self.body.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CreatedPlunk {
    id: String,
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// `ureq`-backed [`PlunkApi`].
#[derive(Clone)]
pub struct PlunkClient {
    agent: ureq::Agent,
    api_base: String,
}

impl PlunkClient {
    pub fn new(config: &SyncConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&format!("plunk/{}", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Perform `request`, translating 404 and 400 into errors.
    ///
    /// Any other status, success or not, is returned as-is.
    pub fn send(&self, request: &PlunkRequest) -> Result<RawResponse, SyncError> {
        let payload = serde_json::to_string(&request.body)?;
        let result = self
            .agent
            .request(request.method, &request.url)
            .query(SESSION_PARAM, &request.session)
            .set("Content-Type", CONTENT_TYPE)
            .send_string(&payload);

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(SyncError::Transport(redact_sessid(&transport.to_string())));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        match status {
            404 => Err(SyncError::StaleCredentialOrOwnership {
                url: request.display_url(),
            }),
            400 => Err(SyncError::MalformedRequest {
                url: request.display_url(),
            }),
            _ => Ok(RawResponse { status, body }),
        }
    }
}

impl PlunkApi for PlunkClient {
    fn create(
        &self,
        description: &str,
        files: &[TutorialFile],
        token: &str,
    ) -> Result<RemoteId, SyncError> {
        let request = PlunkRequest::create(&self.api_base, description, files, token);
        tracing::debug!("plunk create {} ({} files)", request.display_url(), files.len());

        let response = self.send(&request)?;
        tracing::debug!("plunk created: {}", response.body);
        response.expect_status(STATUS_CREATED)?;

        let created: CreatedPlunk = serde_json::from_str(&response.body)
            .map_err(|e| SyncError::InvalidResponse(format!("create response lacks id: {e}")))?;
        if created.id.is_empty() {
            return Err(SyncError::InvalidResponse("create response has empty id".into()));
        }
        Ok(RemoteId(created.id))
    }

    fn update(&self, id: &RemoteId, changes: &ChangeSet, token: &str) -> Result<(), SyncError> {
        let request = PlunkRequest::update(&self.api_base, id, changes, token);
        tracing::debug!("plunk update {} ({} changes)", request.display_url(), changes.len());

        let response = self.send(&request)?;
        response.expect_status(STATUS_OK)
    }
}

/// Mask every `sessid=<value>` occurrence in `text`.
///
/// Transport errors echo the final URL, where the token is already
/// percent-encoded, so a raw `&` always ends the value.
fn redact_sessid(text: &str) -> String {
    const KEY: &str = "sessid=";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(KEY) {
        out.push_str(&rest[..pos + KEY.len()]);
        out.push_str("***");
        let after = &rest[pos + KEY.len()..];
        let end = after
            .find(|c: char| c == '&' || c == '#' || c.is_whitespace())
            .unwrap_or(after.len());
        rest = &after[end..];
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
