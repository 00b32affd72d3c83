//! Integration tests for the CSV result log and offline analysis

mod test_helpers;

use gesture_automation::analysis;
use gesture_automation::constants::RESULT_CSV_HEADER;
use gesture_automation::result_log::{read_records, ResultLogger, ResultRecord};
use test_helpers::temp_path;

fn record(expected: u8, observed: u8, elapsed: f64) -> ResultRecord {
    ResultRecord {
        subject_id: 1,
        gesture_expected: expected,
        gesture_observed: observed,
        elapsed_time: elapsed,
    }
}

#[test]
fn test_header_written_once() {
    let path = temp_path("header.csv");

    let logger = ResultLogger::open(&path).unwrap();
    logger.append(&record(1, 1, 0.1)).unwrap();
    drop(logger);

    // Reopening must append, not rewrite the header
    let logger = ResultLogger::open(&path).unwrap();
    logger.append(&record(5, 5, 0.2)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], RESULT_CSV_HEADER);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_elapsed_time_rounded_to_three_decimals() {
    let path = temp_path("rounding.csv");

    let logger = ResultLogger::open(&path).unwrap();
    logger.append(&record(4, 4, 0.123_456_789)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("1,4,4,0.123"));
    assert!(!content.contains("0.1234"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_read_back_round_trip() {
    let path = temp_path("roundtrip.csv");

    let logger = ResultLogger::open(&path).unwrap();
    let written = [record(0, 0, 0.001), record(1, 1, 0.25), record(5, 5, 1.5)];
    for r in &written {
        logger.append(r).unwrap();
    }

    let read = read_records(&path).unwrap();
    assert_eq!(read.len(), 3);
    for (r, w) in read.iter().zip(&written) {
        assert_eq!(r.subject_id, w.subject_id);
        assert_eq!(r.gesture_expected, w.gesture_expected);
        assert_eq!(r.gesture_observed, w.gesture_observed);
        assert!((r.elapsed_time - w.elapsed_time).abs() < 0.001);
    }

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_read_rejects_foreign_header() {
    let path = temp_path("foreign.csv");
    std::fs::write(&path, "a,b,c,d\n1,1,1,0.1\n").unwrap();

    assert!(read_records(&path).is_err());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_analysis_of_logged_records() {
    let path = temp_path("analysis.csv");

    let logger = ResultLogger::open(&path).unwrap();
    for count in [0u8, 1, 4, 5] {
        logger.append(&record(count, count, 0.1)).unwrap();
    }

    let report_path = temp_path("report.txt");
    let report = analysis::write_report(&path, &report_path).unwrap();

    // Self-labeled logs are perfect by construction
    assert_eq!(report.total, 4);
    assert!((report.accuracy_pct - 100.0).abs() < 1e-9);
    for count in [0usize, 1, 4, 5] {
        assert_eq!(report.confusion[count][count], 1);
    }

    let text = std::fs::read_to_string(&report_path).unwrap();
    assert!(text.contains("Overall Accuracy: 100.00%"));

    std::fs::remove_file(&path).unwrap();
    std::fs::remove_file(&report_path).unwrap();
}

#[test]
fn test_analysis_of_missing_file_is_an_error() {
    let path = temp_path("missing.csv");
    assert!(read_records(&path).is_err());
}
