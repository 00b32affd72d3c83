//! Append-only CSV sink for triggered-action results.
//!
//! One row is written per Idle→Active transition of the cooldown machine,
//! never per frame. The header is written only when the file is created, so
//! repeated runs append to the same log.

use crate::constants::RESULT_CSV_HEADER;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One triggered action, as persisted to the result log.
///
/// `gesture_expected` currently mirrors `gesture_observed` (self-labeling);
/// the field is kept separate so manual ground-truth entry can replace it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    pub subject_id: u32,
    pub gesture_expected: u8,
    pub gesture_observed: u8,
    /// Wall-clock seconds spent computing the action for the frame
    pub elapsed_time: f64,
}

/// Append-only writer for the result CSV
pub struct ResultLogger {
    path: PathBuf,
}

impl ResultLogger {
    /// Open (or create) the result log at `path`, writing the header row
    /// if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let mut file = OpenOptions::new().create(true).write(true).open(&path)?;
            writeln!(file, "{RESULT_CSV_HEADER}")?;
            log::info!("Created result log {}", path.display());
        }

        Ok(Self { path })
    }

    /// Append one record, rounding elapsed time to 3 decimal places
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written
    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{},{},{},{:.3}",
            record.subject_id, record.gesture_expected, record.gesture_observed, record.elapsed_time
        )?;
        Ok(())
    }

    /// Path of the underlying CSV file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read all records from a result CSV, skipping the header row.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the header is missing, or
/// a row fails to parse
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mut lines = content.lines();

    match lines.next() {
        Some(header) if header.trim() == RESULT_CSV_HEADER => {}
        Some(header) => {
            return Err(Error::ResultLogError(format!(
                "Unexpected header: {header}"
            )))
        }
        None => return Err(Error::ResultLogError("Empty result log".to_string())),
    }

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_row(line).map_err(|e| {
            Error::ResultLogError(format!("Row {}: {e}", line_no + 2))
        })?);
    }

    Ok(records)
}

fn parse_row(line: &str) -> std::result::Result<ResultRecord, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, got {}", fields.len()));
    }

    Ok(ResultRecord {
        subject_id: fields[0]
            .parse()
            .map_err(|e| format!("subject_id: {e}"))?,
        gesture_expected: fields[1]
            .parse()
            .map_err(|e| format!("gesture_expected: {e}"))?,
        gesture_observed: fields[2]
            .parse()
            .map_err(|e| format!("gesture_observed: {e}"))?,
        elapsed_time: fields[3]
            .parse()
            .map_err(|e| format!("elapsed_time: {e}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let record = parse_row("1,5,5,0.123").unwrap();
        assert_eq!(record.subject_id, 1);
        assert_eq!(record.gesture_expected, 5);
        assert_eq!(record.gesture_observed, 5);
        assert!((record.elapsed_time - 0.123).abs() < 1e-9);
    }

    #[test]
    fn test_parse_row_rejects_malformed() {
        assert!(parse_row("1,5,5").is_err());
        assert!(parse_row("a,b,c,d").is_err());
    }
}
