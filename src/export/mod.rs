pub mod bank_files;
pub mod filter;
pub mod records;
pub mod report;

pub use bank_files::{render_bank_file, safe_file_name, write_bank_files};
pub use filter::RecordFilter;
pub use records::{write_csv, write_json, write_xlsx, COLUMNS, SHEET_NAME};
pub use report::summary_report;

use chrono::Local;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{error::Result, resolve::BatchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    /// Per-bank text files plus the summary report.
    Text,
    All,
}

/// Write the requested artifacts for `state` into `dir`.
///
/// The filter narrows the CSV/JSON/xlsx record list only; per-bank files and the
/// summary always cover the whole batch.
pub fn export(
    state: &BatchState,
    filter: &RecordFilter,
    dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let generated = Local::now();
    let stamp = generated.format("%Y%m%d_%H%M%S");
    let records = filter.apply(state.results());
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::All) {
        let path = dir.join(format!("upi_results_{}.csv", stamp));
        write_csv(BufWriter::new(File::create(&path)?), records.iter().copied())?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Json | ExportFormat::All) {
        let path = dir.join(format!("upi_results_{}.json", stamp));
        write_json(BufWriter::new(File::create(&path)?), records.iter().copied())?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Xlsx | ExportFormat::All) {
        let path = dir.join(format!("upi_results_{}.xlsx", stamp));
        write_xlsx(&path, records.iter().copied())?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Text | ExportFormat::All) {
        written.extend(write_bank_files(state.aggregator(), dir, generated)?);

        let path = dir.join(format!("summary_report_{}.txt", stamp));
        std::fs::write(&path, summary_report(state, generated))?;
        written.push(path);
    }

    info!("Exported {} file(s) to {}", written.len(), dir.display());
    Ok(written)
}
