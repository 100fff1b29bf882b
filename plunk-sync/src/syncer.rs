//! Tutorial ↔ plunk synchronization.
//!
//! [`TutorialSyncer`] owns one [`TutorialRecord`] and pushes it to the plunk
//! service through an injected [`PlunkApi`]:
//!
//! 1. Reconcile the stored files against the incoming set.
//! 2. Skip the remote entirely when nothing changed and a real plunk exists.
//! 3. Otherwise create a new plunk, or, with [`PushStrategy::Incremental`]
//!    and a real plunk id, send only the change set.
//!
//! A failed push does not roll back step 1: the record keeps the incoming
//! files while the remote keeps its old state.

use plunk_core::{ChangeSet, FileSet, PushStrategy, RemoteId, SyncConfig, TutorialFile, TutorialRecord};

use crate::archive;
use crate::client::PlunkApi;
use crate::error::SyncError;
use crate::reconcile::reconcile;

/// What [`TutorialSyncer::reconcile_and_push`] did remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// No changes and a real plunk already exists — no request was made.
    Unchanged,
    /// A new plunk (or stub id) was created and stored on the record.
    Created { id: RemoteId },
    /// The change set was sent to the existing plunk.
    Updated { id: RemoteId },
}

/// Result of one reconcile-and-push run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub changes: ChangeSet,
    pub outcome: PushOutcome,
}

/// Keeps a tutorial record and its remote plunk in sync.
pub struct TutorialSyncer<A: PlunkApi> {
    record: TutorialRecord,
    api: A,
    config: SyncConfig,
}

impl<A: PlunkApi> TutorialSyncer<A> {
    pub fn new(record: TutorialRecord, api: A, config: SyncConfig) -> Self {
        Self { record, api, config }
    }

    pub fn record(&self) -> &TutorialRecord {
        &self.record
    }

    pub fn into_record(self) -> TutorialRecord {
        self.record
    }

    /// `<editor_base>/edit/<id>?p=preview`, or `None` before the first push.
    pub fn share_url(&self) -> Option<String> {
        share_url(&self.config.editor_base, &self.record)
    }

    /// Zip archive with one entry per stored file.
    pub fn package_as_archive(&self) -> Result<Vec<u8>, SyncError> {
        archive::package(&self.record.files)
    }

    /// Reconcile the stored files with `new_files` and push the result.
    pub fn reconcile_and_push(
        &mut self,
        new_files: &FileSet,
        token: &str,
    ) -> Result<SyncReport, SyncError> {
        let web_path = self.record.web_path.clone();
        tracing::debug!(
            "reconcile '{}' (plunk {})",
            web_path,
            self.record
                .remote_id
                .as_ref()
                .map_or("-", RemoteId::as_str)
        );
        tracing::debug!("OLD files: {:?}", file_names(&self.record.files));
        tracing::debug!("NEW files: {:?}", new_files.keys().collect::<Vec<_>>());

        let changes = reconcile(&mut self.record.files, new_files);
        tracing::debug!("UPDATED files: {:?}", file_names(&self.record.files));

        if changes.is_empty() && self.record.has_remote() {
            tracing::debug!("'{web_path}': no changes, skip updating");
            return Ok(SyncReport {
                changes,
                outcome: PushOutcome::Unchanged,
            });
        }
        tracing::debug!("'{web_path}' changes: {:?}", changes.keys().collect::<Vec<_>>());

        let existing = self.record.remote_id.clone().filter(|id| !id.is_stub());
        let outcome = match (self.config.strategy, existing) {
            (PushStrategy::Incremental, Some(id)) => {
                tracing::info!("update plunk {id} for '{web_path}'");
                self.update_remote(&id, &changes, token)?;
                PushOutcome::Updated { id }
            }
            _ => {
                tracing::info!("create plunk for '{web_path}'");
                let id = self.create_remote(&self.record.description, &self.record.files, token)?;
                self.record.remote_id = Some(id.clone());
                PushOutcome::Created { id }
            }
        };

        Ok(SyncReport { changes, outcome })
    }

    /// Create a plunk, or hand out a stub id when remote calls are disabled.
    pub fn create_remote(
        &self,
        description: &str,
        files: &[TutorialFile],
        token: &str,
    ) -> Result<RemoteId, SyncError> {
        if !self.config.remote_calls_enabled {
            let id = RemoteId::stub();
            tracing::debug!("remote calls disabled, using stub id {id}");
            return Ok(id);
        }
        self.api.create(description, files, token)
    }

    /// Send `changes` to plunk `id`. No-op when remote calls are disabled.
    pub fn update_remote(
        &self,
        id: &RemoteId,
        changes: &ChangeSet,
        token: &str,
    ) -> Result<(), SyncError> {
        if !self.config.remote_calls_enabled {
            tracing::debug!("remote calls disabled, skip update of {id}");
            return Ok(());
        }
        self.api.update(id, changes, token)
    }
}

/// Share URL for `record` under `editor_base`.
pub fn share_url(editor_base: &str, record: &TutorialRecord) -> Option<String> {
    record
        .remote_id
        .as_ref()
        .map(|id| format!("{}/edit/{}?p=preview", editor_base.trim_end_matches('/'), id))
}

fn file_names(files: &[TutorialFile]) -> Vec<&str> {
    files.iter().map(|f| f.filename.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
