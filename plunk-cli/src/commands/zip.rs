//! `plunk zip <web_path>` — write the tutorial's stored files as a zip archive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use plunk_core::store::record_key;
use plunk_sync::archive;

use super::{home_dir, load_entry};

/// Arguments for `plunk zip`.
#[derive(Args, Debug)]
pub struct ZipArgs {
    /// Web path of the tutorial.
    pub web_path: String,

    /// Output file. Defaults to `<key>.zip` in the current directory.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ZipArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let entry = load_entry(&home, &self.web_path)?;

        let bytes = archive::package(&entry.record.files)
            .with_context(|| format!("failed to package '{}'", self.web_path))?;
        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.zip", record_key(&self.web_path))));
        std::fs::write(&output, bytes)
            .with_context(|| format!("cannot write '{}'", output.display()))?;

        println!(
            "✓ Wrote {} files to {}",
            entry.record.files.len(),
            output.display()
        );
        Ok(())
    }
}
