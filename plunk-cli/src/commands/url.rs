//! `plunk url <web_path>` — print the share URL of a tutorial's plunk.

use anyhow::Result;
use clap::Args;

use plunk_sync::share_url;

use super::{home_dir, load_entry, sync_config};

/// Arguments for `plunk url`.
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Web path of the tutorial.
    pub web_path: String,
}

impl UrlArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let config = sync_config()?;
        let entry = load_entry(&home, &self.web_path)?;

        match share_url(&config.editor_base, &entry.record) {
            Some(url) => println!("{url}"),
            None => println!(
                "No plunk yet for '{}'. Run `plunk sync` first.",
                self.web_path
            ),
        }
        Ok(())
    }
}
