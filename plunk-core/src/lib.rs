//! Plunk core library — tutorial record types, sync configuration, record store.
//!
//! - [`types`] — [`TutorialRecord`], [`TutorialFile`], [`RemoteId`]
//! - [`config`] — [`SyncConfig`] and [`PushStrategy`]
//! - [`store`] — load / save / list records under `~/.plunk/`
//! - [`error`] — [`StoreError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{PushStrategy, SyncConfig};
pub use error::{ConfigError, StoreError};
pub use store::TutorialEntry;
pub use types::{file_set, ChangeSet, FileSet, RemoteId, TutorialFile, TutorialRecord};
