use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    error::Result,
    resolve::{record::TIMESTAMP_FORMAT, Aggregator, ResolutionRecord},
};

/// Keeps alphanumerics, space, `-` and `_`, then swaps spaces for underscores.
pub fn safe_file_name(bank: &str) -> String {
    let kept: String = bank
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let name = kept.trim().replace(' ', "_");
    if name.is_empty() {
        "bank".to_string()
    } else {
        name
    }
}

pub fn render_bank_file<'a>(
    bank: &str,
    records: impl IntoIterator<Item = &'a ResolutionRecord>,
    generated: DateTime<Local>,
) -> String {
    let records: Vec<&ResolutionRecord> = records.into_iter().collect();
    let mut lines = vec![
        format!("Bank: {}", bank),
        format!("Total Records: {}", records.len()),
        format!("Generated: {}", generated.format(TIMESTAMP_FORMAT)),
        "-".repeat(50),
        String::new(),
    ];

    for record in records {
        lines.push(format!("Mobile: {}", record.mobile));
        lines.push(format!("Name: {}", record.name));
        lines.push(format!("VPA: {}", record.vpa));
        lines.push(format!("IFSC: {}", record.ifsc));
        if let Some(handle) = &record.upi_handle {
            lines.push(format!("UPI Handle: {}", handle));
        }
        lines.push(format!("Status: {}", record.status));
        lines.push(format!("Timestamp: {}", record.timestamp));
        lines.push("-".repeat(30));
    }

    lines.join("\n")
}

/// One text file per bank with at least one successful record.
///
/// Banks whose names sanitize to the same stem get `_2`, `_3`, ... so no file
/// is overwritten within one export.
pub fn write_bank_files(
    aggregator: &Aggregator,
    dir: &Path,
    generated: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let stamp = generated.format("%Y%m%d_%H%M%S");
    let mut written = Vec::new();
    let mut taken = HashSet::new();

    for bank in aggregator.banks() {
        let stem = unique_stem(safe_file_name(bank), &mut taken);
        let path = dir.join(format!("{}_{}.txt", stem, stamp));
        let content = render_bank_file(bank, aggregator.records_for_bank(bank), generated);
        std::fs::write(&path, content)?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn unique_stem(base: String, taken: &mut HashSet<String>) -> String {
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.clone()) {
        stem = format!("{}_{}", base, n);
        n += 1;
    }
    stem
}
