pub mod diff;
pub mod init;
pub mod status;
pub mod sync;
pub mod url;
pub mod zip;

use std::path::PathBuf;

use anyhow::{Context, Result};

use plunk_core::{store, SyncConfig, TutorialEntry};

pub(crate) fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

pub(crate) fn sync_config() -> Result<SyncConfig> {
    SyncConfig::from_env().context("invalid PLNKR_* configuration")
}

pub(crate) fn load_entry(home: &std::path::Path, web_path: &str) -> Result<TutorialEntry> {
    store::load_at(home, web_path).with_context(|| {
        format!("no tutorial registered for '{web_path}' — run `plunk init` first")
    })
}
