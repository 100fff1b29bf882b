//! `plunk status` — registered tutorials and their plunks.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use plunk_core::{store, SyncConfig, TutorialEntry};
use plunk_sync::share_url;

use super::{home_dir, sync_config};

/// Arguments for `plunk status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let config = sync_config()?;
        let entries = store::list_at(&home).context("failed to load tutorial store")?;

        let rows: Vec<TutorialStatus> = entries
            .iter()
            .map(|entry| TutorialStatus::from_entry(entry, &config))
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_table(rows, &config);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum PlunkState {
    Unpublished,
    Stub,
    Remote,
}

#[derive(Debug, Clone, Serialize)]
struct TutorialStatus {
    web_path: String,
    state: PlunkState,
    remote_id: Option<String>,
    url: Option<String>,
    files: usize,
    last_sync_at: Option<String>,
    #[serde(skip)]
    last_sync_age: String,
}

impl TutorialStatus {
    fn from_entry(entry: &TutorialEntry, config: &SyncConfig) -> Self {
        let record = &entry.record;
        let state = match &record.remote_id {
            None => PlunkState::Unpublished,
            Some(id) if id.is_stub() => PlunkState::Stub,
            Some(_) => PlunkState::Remote,
        };
        Self {
            web_path: record.web_path.clone(),
            state,
            remote_id: record.remote_id.as_ref().map(|id| id.to_string()),
            url: share_url(&config.editor_base, record).filter(|_| state == PlunkState::Remote),
            files: record.files.len(),
            last_sync_at: entry.synced_at.map(|t| t.to_rfc3339()),
            last_sync_age: entry
                .synced_at
                .map(format_datetime_age)
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "tutorial")]
    web_path: String,
    #[tabled(rename = "plunk")]
    plunk: String,
    #[tabled(rename = "files")]
    files: usize,
    #[tabled(rename = "last sync")]
    last_sync: String,
}

fn print_table(rows: Vec<TutorialStatus>, config: &SyncConfig) {
    let stubs = rows.iter().filter(|r| r.state == PlunkState::Stub).count();
    println!(
        "plunk v{} | {} tutorials | {} stub | remote calls {}",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        stubs,
        if config.remote_calls_enabled {
            "enabled".green().to_string()
        } else {
            "disabled".yellow().to_string()
        },
    );

    if rows.is_empty() {
        println!("No tutorials registered.");
        return;
    }

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            plunk: plunk_label(&row),
            web_path: row.web_path,
            files: row.files,
            last_sync: row.last_sync_age,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if stubs > 0 {
        println!("Set PLNKR_ENABLED and run 'plunk sync' to publish stub plunks.");
    }
}

fn plunk_label(row: &TutorialStatus) -> String {
    match (row.state, &row.remote_id) {
        (PlunkState::Remote, Some(id)) => id.clone(),
        (PlunkState::Stub, _) => "stub".to_string(),
        _ => "—".to_string(),
    }
}

fn format_datetime_age(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    if age < 60 {
        return format!("{age}s ago");
    }
    if age < 60 * 60 {
        return format!("{}m ago", age / 60);
    }
    if age < 60 * 60 * 24 {
        return format!("{}h ago", age / (60 * 60));
    }
    format!("{}d ago", age / (60 * 60 * 24))
}
