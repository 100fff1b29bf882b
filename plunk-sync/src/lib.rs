//! # plunk-sync
//!
//! Reconcile a tutorial's files with an incoming set and push the result to
//! the plunk service.
//!
//! Build a [`TutorialSyncer`] around a record, a [`PlunkApi`] (normally
//! [`PlunkClient`]) and a [`plunk_core::SyncConfig`], then call
//! [`TutorialSyncer::reconcile_and_push`].

pub mod archive;
pub mod client;
pub mod diff;
pub mod error;
pub mod reconcile;
pub mod source;
pub mod syncer;

pub use client::{PlunkApi, PlunkClient, PlunkRequest, RawResponse};
pub use diff::{diff_record, ChangeKind, FileDiff};
pub use error::SyncError;
pub use source::collect_dir;
pub use syncer::{share_url, PushOutcome, SyncReport, TutorialSyncer};
