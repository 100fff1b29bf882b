//! `plunk sync` — reconcile a tutorial with a directory and push it to plnkr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;

use plunk_core::{config::ENV_SESSION, store, ChangeSet, PushStrategy};
use plunk_sync::{
    collect_dir, diff_record, share_url, ChangeKind, PlunkClient, PushOutcome, TutorialSyncer,
};

use super::{home_dir, load_entry, sync_config};

/// Arguments for `plunk sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Web path of the tutorial to sync.
    pub web_path: String,

    /// Directory holding the tutorial's current files.
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// plnkr session id. Falls back to $PLNKR_SESSION.
    #[arg(long)]
    pub token: Option<String>,

    /// Send only changed files to an existing plunk instead of recreating it.
    #[arg(long)]
    pub incremental: bool,

    /// Show what would be pushed without touching plnkr or the store.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let mut config = sync_config()?;
        if self.incremental {
            config.strategy = PushStrategy::Incremental;
        }

        let mut entry = load_entry(&home, &self.web_path)?;
        let incoming = collect_dir(&self.dir)
            .with_context(|| format!("cannot read tutorial files from '{}'", self.dir.display()))?;

        if self.dry_run {
            let diffs = diff_record(&entry.record, &incoming);
            if diffs.is_empty() {
                println!("[dry-run] ✓ '{}' — nothing to do", self.web_path);
                return Ok(());
            }
            println!("[dry-run] '{}' — {} files would change", self.web_path, diffs.len());
            for diff in diffs {
                let marker = match diff.kind {
                    ChangeKind::Added => "+",
                    ChangeKind::Modified => "✎",
                    ChangeKind::Deleted => "✗",
                };
                println!("  {marker}  {}", diff.filename);
            }
            return Ok(());
        }

        let token = self
            .token
            .or_else(|| std::env::var(ENV_SESSION).ok())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_default();
        if config.remote_calls_enabled && token.is_empty() {
            bail!("a plnkr session id is required: pass --token or set {ENV_SESSION}");
        }

        let client = PlunkClient::new(&config);
        let mut syncer = TutorialSyncer::new(entry.record.clone(), client, config.clone());
        let report = syncer
            .reconcile_and_push(&incoming, &token)
            .with_context(|| format!("sync failed for '{}'", self.web_path))?;

        entry.record = syncer.into_record();
        entry.synced_at = Some(Utc::now());
        store::save_at(&home, &entry)
            .with_context(|| format!("failed to save '{}'", self.web_path))?;

        print_outcome(&self.web_path, &report.outcome, &report.changes);
        if let Some(url) = share_url(&config.editor_base, &entry.record) {
            println!("  →  {url}");
        }
        Ok(())
    }
}

fn print_outcome(web_path: &str, outcome: &PushOutcome, changes: &ChangeSet) {
    match outcome {
        PushOutcome::Unchanged => {
            println!("✓ '{web_path}' — nothing to do");
            return;
        }
        PushOutcome::Created { id } if id.is_stub() => println!(
            "✓ '{web_path}' stub plunk {id} ({} changes; remote calls disabled)",
            changes.len()
        ),
        PushOutcome::Created { id } => {
            println!("✓ '{web_path}' created plunk {id} ({} changes)", changes.len())
        }
        PushOutcome::Updated { id } => {
            println!("✓ '{web_path}' updated plunk {id} ({} changes)", changes.len())
        }
    }

    for (name, change) in changes {
        match change {
            Some(_) => println!("  ✎  {name}"),
            None => println!("  ✗  {name}"),
        }
    }
}
