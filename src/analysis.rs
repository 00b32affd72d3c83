//! Offline analysis of the result log: accuracy, mean detection time,
//! confusion matrix and per-gesture accuracy.
//!
//! Consumes the CSV produced by [`crate::result_log::ResultLogger`] and
//! renders a plain-text report.

use crate::result_log::ResultRecord;
use crate::{Error, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Number of gesture labels (counts 0..=5)
const NUM_LABELS: usize = 6;

/// Summary statistics computed from the result log
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Total number of records analyzed
    pub total: usize,
    /// Fraction of rows where expected == observed, in percent
    pub accuracy_pct: f64,
    /// Mean elapsed detection time in seconds
    pub mean_elapsed: f64,
    /// Confusion matrix indexed `[expected][observed]` over labels 0..=5
    pub confusion: [[usize; NUM_LABELS]; NUM_LABELS],
    /// Per-gesture accuracy in percent, for labels that appear as expected
    pub per_label_accuracy: Vec<(u8, f64)>,
}

/// Compute the analysis over a set of records
///
/// # Errors
///
/// Returns an error if `records` is empty or contains a gesture label
/// outside 0..=5
#[allow(clippy::cast_precision_loss)] // Record counts are far below 2^52
pub fn analyze(records: &[ResultRecord]) -> Result<AnalysisReport> {
    if records.is_empty() {
        return Err(Error::InvalidInput(
            "Result log contains no records to analyze".to_string(),
        ));
    }

    let mut confusion = [[0usize; NUM_LABELS]; NUM_LABELS];
    let mut correct = 0usize;
    let mut elapsed_sum = 0.0;

    for record in records {
        let expected = usize::from(record.gesture_expected);
        let observed = usize::from(record.gesture_observed);
        if expected >= NUM_LABELS || observed >= NUM_LABELS {
            return Err(Error::InvalidInput(format!(
                "Gesture label out of range: expected={expected} observed={observed}"
            )));
        }

        confusion[expected][observed] += 1;
        if expected == observed {
            correct += 1;
        }
        elapsed_sum += record.elapsed_time;
    }

    let total = records.len();
    let accuracy_pct = correct as f64 / total as f64 * 100.0;
    let mean_elapsed = elapsed_sum / total as f64;

    let mut per_label_accuracy = Vec::new();
    for label in 0..NUM_LABELS {
        let row_total: usize = confusion[label].iter().sum();
        if row_total > 0 {
            #[allow(clippy::cast_possible_truncation)] // label < 6
            let label_u8 = label as u8;
            per_label_accuracy.push((
                label_u8,
                confusion[label][label] as f64 / row_total as f64 * 100.0,
            ));
        }
    }

    Ok(AnalysisReport {
        total,
        accuracy_pct,
        mean_elapsed,
        confusion,
        per_label_accuracy,
    })
}

/// Render the report as plain text
#[must_use]
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "===== Gesture Recognition Accuracy Report =====");
    let _ = writeln!(out, "Records analyzed: {}", report.total);
    let _ = writeln!(out, "Overall Accuracy: {:.2}%", report.accuracy_pct);
    let _ = writeln!(
        out,
        "Average Detection Time: {:.3} seconds",
        report.mean_elapsed
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Confusion Matrix (rows expected, columns observed):");
    let _ = write!(out, "      ");
    for observed in 0..NUM_LABELS {
        let _ = write!(out, "{observed:>6}");
    }
    let _ = writeln!(out);
    for (expected, row) in report.confusion.iter().enumerate() {
        let _ = write!(out, "{expected:>6}");
        for &cell in row {
            let _ = write!(out, "{cell:>6}");
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Accuracy per Gesture:");
    for (label, accuracy) in &report.per_label_accuracy {
        let _ = writeln!(out, "  gesture {label}: {accuracy:.2}%");
    }

    out
}

/// Read a result CSV, analyze it, and write the text report to `out_path`
///
/// # Errors
///
/// Returns an error if the log cannot be read or the report cannot be
/// written
pub fn write_report<P: AsRef<Path>, Q: AsRef<Path>>(csv_path: P, out_path: Q) -> Result<AnalysisReport> {
    let records = crate::result_log::read_records(csv_path)?;
    let report = analyze(&records)?;
    std::fs::write(out_path.as_ref(), render_report(&report))?;
    log::info!(
        "Analysis of {} records written to {}",
        report.total,
        out_path.as_ref().display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expected: u8, observed: u8, elapsed: f64) -> ResultRecord {
        ResultRecord {
            subject_id: 1,
            gesture_expected: expected,
            gesture_observed: observed,
            elapsed_time: elapsed,
        }
    }

    #[test]
    fn test_self_labeled_log_is_trivially_perfect() {
        let records = vec![record(0, 0, 0.1), record(1, 1, 0.2), record(5, 5, 0.3)];
        let report = analyze(&records).unwrap();
        assert_eq!(report.total, 3);
        assert!((report.accuracy_pct - 100.0).abs() < 1e-9);
        assert!((report.mean_elapsed - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let records = vec![record(1, 1, 0.0), record(1, 4, 0.0), record(4, 4, 0.0)];
        let report = analyze(&records).unwrap();
        assert_eq!(report.confusion[1][1], 1);
        assert_eq!(report.confusion[1][4], 1);
        assert_eq!(report.confusion[4][4], 1);
        assert!((report.accuracy_pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_label_accuracy() {
        let records = vec![record(1, 1, 0.0), record(1, 0, 0.0), record(5, 5, 0.0)];
        let report = analyze(&records).unwrap();
        assert_eq!(report.per_label_accuracy, vec![(1, 50.0), (5, 100.0)]);
    }

    #[test]
    fn test_empty_log_is_an_error() {
        assert!(analyze(&[]).is_err());
    }

    #[test]
    fn test_out_of_range_label_is_an_error() {
        assert!(analyze(&[record(9, 9, 0.0)]).is_err());
    }

    #[test]
    fn test_render_report_contains_summary() {
        let report = analyze(&[record(1, 1, 0.5)]).unwrap();
        let text = render_report(&report);
        assert!(text.contains("Overall Accuracy: 100.00%"));
        assert!(text.contains("Average Detection Time: 0.500 seconds"));
        assert!(text.contains("gesture 1: 100.00%"));
    }
}
