use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::{error::Result, resolve::ResolutionRecord};

pub const COLUMNS: [&str; 8] = [
    "mobile",
    "name",
    "bank",
    "vpa",
    "ifsc",
    "upi_handle",
    "status",
    "timestamp",
];

pub const SHEET_NAME: &str = "UPI Results";

#[derive(Serialize)]
struct CsvRow<'a> {
    mobile: &'a str,
    name: &'a str,
    bank: &'a str,
    vpa: &'a str,
    ifsc: &'a str,
    upi_handle: Option<&'a str>,
    status: String,
    timestamp: &'a str,
}

impl<'a> From<&'a ResolutionRecord> for CsvRow<'a> {
    fn from(record: &'a ResolutionRecord) -> Self {
        Self {
            mobile: record.mobile.as_str(),
            name: &record.name,
            bank: &record.bank,
            vpa: &record.vpa,
            ifsc: &record.ifsc,
            upi_handle: record.upi_handle.as_deref(),
            status: record.status.to_string(),
            timestamp: &record.timestamp,
        }
    }
}

impl CsvRow<'_> {
    fn cells(&self) -> [&str; 8] {
        [
            self.mobile,
            self.name,
            self.bank,
            self.vpa,
            self.ifsc,
            self.upi_handle.unwrap_or_default(),
            &self.status,
            self.timestamp,
        ]
    }
}

pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ResolutionRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut wrote_any = false;

    for record in records {
        wtr.serialize(CsvRow::from(record))?;
        wrote_any = true;
    }

    // serde only emits the header alongside the first row
    if !wrote_any {
        wtr.write_record(COLUMNS)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_json<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ResolutionRecord>,
{
    let records: Vec<&ResolutionRecord> = records.into_iter().collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Single-sheet workbook with the CSV columns and a bold header row.
pub fn write_xlsx<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ResolutionRecord>,
{
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, record) in records.into_iter().enumerate() {
        let row = CsvRow::from(record);
        for (col, value) in row.cells().iter().enumerate() {
            sheet.write_string(i as u32 + 1, col as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Identity, PhoneNumber};

    fn sample() -> Vec<ResolutionRecord> {
        vec![
            ResolutionRecord::success(
                PhoneNumber::parse("8900200543").unwrap(),
                Identity {
                    name: "JOHN DOE".into(),
                    bank: "STATE BANK".into(),
                    vpa: "8900200543@ybl".into(),
                    ifsc: "SBIN0001".into(),
                },
                "@ybl",
            ),
            ResolutionRecord::failed(PhoneNumber::parse("9123456789").unwrap(), "timeout".into()),
        ]
    }

    #[test]
    fn csv_has_fixed_columns() {
        let mut out = Vec::new();
        write_csv(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "mobile,name,bank,vpa,ifsc,upi_handle,status,timestamp"
        );
        assert!(lines
            .next()
            .unwrap()
            .starts_with("8900200543,JOHN DOE,STATE BANK,8900200543@ybl,SBIN0001,@ybl,Success,"));
        assert!(lines
            .next()
            .unwrap()
            .starts_with("9123456789,N/A,N/A,N/A,N/A,,Failed,"));
    }

    #[test]
    fn empty_csv_still_has_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &Vec::<ResolutionRecord>::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            "mobile,name,bank,vpa,ifsc,upi_handle,status,timestamp"
        );
    }

    #[test]
    fn xlsx_workbook_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        write_xlsx(&path, &sample()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn json_keeps_error_for_failures() {
        let mut out = Vec::new();
        write_json(&mut out, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value[0]["mobile"], "8900200543");
        assert!(value[0].get("error").is_none());
        assert_eq!(value[1]["status"], "Failed");
        assert_eq!(value[1]["error"], "timeout");
    }
}
