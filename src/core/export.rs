use crate::config::Config;
use crate::core::ledger::DateRange;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_agent, require_agent};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::utils::money::{format_cents, format_hours};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Flat per-entry record for export files.
///
/// Every numeric column is a pre-formatted decimal string, so a CSV opened
/// in a spreadsheet shows exactly the cents the ledger carries.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub date: String,
    pub hours: String,
    pub rate: String,
    pub total: String,
    pub paid: String,
    pub due: String,
    pub site: String,
    pub note: String,
}

impl EntryExport {
    fn from_entry(e: &TimeEntry) -> Self {
        Self {
            date: e.date_str(),
            hours: format_hours(e.hours_milli),
            rate: format_cents(e.rate_cents),
            total: format_cents(e.amount_cents),
            paid: format_cents(e.paid_cents),
            due: format_cents(e.outstanding_cents()),
            site: e.site_name.clone().unwrap_or_default(),
            note: e.note.clone(),
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export one agent's entries.
    ///
    /// - `file`: path of the output file
    /// - `range`: `None`, `"all"` or an expression like `YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD` or `start:end`
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        agent_ident: &str,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        let agent = require_agent(&pool.conn, agent_ident)?;
        let bounds = DateRange::parse(range)?;

        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows: Vec<EntryExport> = load_entries_for_agent(pool, agent.id)?
            .iter()
            .filter(|e| bounds.contains(e.date))
            .map(EntryExport::from_entry)
            .collect();

        if rows.is_empty() {
            println!("⚠️  No entries found for the selected range. Nothing to export.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path, cfg.csv_delimiter_byte())?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }
}

/// Check if the file can be overwritten.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    eprint!(
        "⚠️  File '{}' already exists. Overwrite? [y/N]: ",
        path.display()
    );
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".into(),
        ))
    }
}

fn export_csv(rows: &[EntryExport], path: &Path, delimiter: u8) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    println!("✅ Exported {} entries to {}", rows.len(), path.display());
    Ok(())
}

fn export_json(rows: &[EntryExport], path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    println!("✅ Exported {} entries to {}", rows.len(), path.display());
    Ok(())
}
