use std::path::Path;
use tracing::{debug, info};

use crate::{error::Result, lookup::PhoneNumber};

/// A non-blank line that is not a 10-digit number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    pub line: usize,
    pub content: String,
}

/// Outcome of reading a numbers file, one number per line.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_lines: usize,
    pub numbers: Vec<PhoneNumber>,
    pub invalid: Vec<InvalidEntry>,
}

impl LoadReport {
    /// Blank lines are skipped; anything else that does not parse is reported with
    /// its 1-based line number.
    pub fn parse(content: &str) -> Self {
        let mut report = LoadReport::default();

        for (i, line) in content.lines().enumerate() {
            report.total_lines += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match PhoneNumber::parse(trimmed) {
                Ok(number) => report.numbers.push(number),
                Err(_) => {
                    debug!("Line {}: rejected {:?}", i + 1, trimmed);
                    report.invalid.push(InvalidEntry {
                        line: i + 1,
                        content: trimmed.to_string(),
                    });
                }
            }
        }

        report
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report = Self::parse(&content);
        info!(
            "Read {}: {} lines, {} valid, {} invalid",
            path.display(),
            report.total_lines,
            report.numbers.len(),
            report.invalid.len()
        );
        Ok(report)
    }
}

/// Ten numbers in the accepted format.
pub const SAMPLE_NUMBERS: [&str; 10] = [
    "8900200543",
    "9876543210",
    "9123456789",
    "8765432109",
    "7890123456",
    "9988776655",
    "8877665544",
    "7766554433",
    "9955443322",
    "8844332211",
];

pub fn sample_file_content() -> String {
    SAMPLE_NUMBERS.join("\n")
}
