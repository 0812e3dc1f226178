//! CLI command for journal export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{JournalError, JournalResult};
use crate::export::{export_journal_csv, export_journal_json, export_journal_yaml, JournalExport};
use crate::models::Department;
use crate::remote::Directory;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per entry
    Csv,
    /// Entries with schema version and summary
    Json,
    /// Same as JSON, human-readable
    Yaml,
}

/// Export a department's journal to a file
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Department to export (sales or service)
    pub department: Department,

    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub async fn handle_export_command<D: Directory + ?Sized>(
    directory: &D,
    source: &str,
    args: ExportArgs,
) -> JournalResult<()> {
    let entries = directory.list_journal_entries(args.department).await?;
    let count = entries.len();

    let file = File::create(&args.output).map_err(|e| {
        JournalError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => {
            export_journal_csv(&entries, &mut writer)?;
        }
        ExportFormat::Json => {
            let export = JournalExport::new(args.department, source, entries);
            export_journal_json(&export, &mut writer, args.pretty)?;
        }
        ExportFormat::Yaml => {
            let export = JournalExport::new(args.department, source, entries);
            export_journal_yaml(&export, &mut writer)?;
        }
    }
    writer
        .flush()
        .map_err(|e| JournalError::Export(e.to_string()))?;

    tracing::info!(department = %args.department, count, path = %args.output.display(), "journal exported");
    println!(
        "Exported {} {} entries to: {}",
        count,
        args.department,
        args.output.display()
    );
    Ok(())
}
