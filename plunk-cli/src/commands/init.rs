//! `plunk init <web_path> --description <text>`

use anyhow::{Context, Result};
use clap::Args;

use plunk_core::store;

use super::home_dir;

/// Register a tutorial in the local store.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Web path of the owning tutorial document (e.g. "/js/closure").
    pub web_path: String,

    /// Description sent to plnkr as the plunk's title.
    #[arg(long, short = 'm', default_value = "")]
    pub description: String,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let entry = store::init_at(&home, &self.description, &self.web_path)
            .with_context(|| format!("failed to init '{}'", self.web_path))?;

        println!("✓ Registered '{}'", entry.record.web_path);
        println!(
            "  Saved to: ~/.plunk/tutorials/{}.yaml",
            store::record_key(&entry.record.web_path)
        );
        Ok(())
    }
}
