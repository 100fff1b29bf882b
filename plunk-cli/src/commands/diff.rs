//! `plunk diff <web_path> --dir <dir>` — show unified diffs for what sync would push.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use plunk_sync::{collect_dir, diff_record};

use super::{home_dir, load_entry};

/// Arguments for `plunk diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Web path of the tutorial to diff.
    pub web_path: String,

    /// Directory holding the tutorial's current files.
    #[arg(long, short = 'd')]
    pub dir: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let entry = load_entry(&home, &self.web_path)?;
        let incoming = collect_dir(&self.dir)
            .with_context(|| format!("cannot read tutorial files from '{}'", self.dir.display()))?;

        let diffs = diff_record(&entry.record, &incoming);
        if diffs.is_empty() {
            println!("No differences for '{}'.", self.web_path);
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
