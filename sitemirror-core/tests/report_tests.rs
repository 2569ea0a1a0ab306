// Tests for report generation functionality

use sitemirror_core::report::{
    MirrorSummary, ReportFormat, format_bytes, format_duration, generate_json_report,
    generate_mirror_report, generate_text_report,
};
use sitemirror_engine::{ContentKind, FetchRecord, MirrorReport};
use std::path::PathBuf;
use std::time::Duration;

fn sample_report() -> MirrorReport {
    let mut index = FetchRecord::new("https://example.com/".to_string(), 0);
    index.status_code = 200;
    index.content_type = Some("text/html".to_string());
    index.kind = Some(ContentKind::Html);
    index.local_path = Some(PathBuf::from("example.com/index.html"));
    index.bytes_written = 2048;
    index.links_rewritten = 3;

    let mut logo = FetchRecord::new("https://example.com/logo.png".to_string(), 0);
    logo.status_code = 200;
    logo.content_type = Some("image/png".to_string());
    logo.kind = Some(ContentKind::Asset);
    logo.local_path = Some(PathBuf::from("example.com/logo.png"));
    logo.bytes_written = 1024;

    let mut missing = FetchRecord::new("https://example.com/gone".to_string(), 1);
    missing.status_code = 404;
    missing.error = Some("HTTP 404 for https://example.com/gone".to_string());

    MirrorReport {
        start_url: "https://example.com/".to_string(),
        root_dir: PathBuf::from("example.com"),
        max_depth: 1,
        concurrency: 5,
        records: vec![missing, logo, index],
        elapsed: Duration::from_millis(1500),
        peak_in_flight: 2,
        peak_queued: 2,
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("csv"), None);
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_counts() {
    let summary = MirrorSummary::from_report(&sample_report());
    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.saved, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.html_pages, 1);
    assert_eq!(summary.assets, 1);
    assert_eq!(summary.bytes_written, 3072);
    assert_eq!(summary.links_rewritten, 3);
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contains_summary() {
    let text = generate_text_report(&sample_report());
    assert!(text.contains("SITEMIRROR REPORT"));
    assert!(text.contains("Start URL:    https://example.com/"));
    assert!(text.contains("URLs fetched:     3"));
    assert!(text.contains("Failed:           1"));
    assert!(text.contains("3.0 KiB"));
    assert!(text.contains("1.50s"));
}

#[test]
fn test_text_report_lists_records_by_depth() {
    let text = generate_text_report(&sample_report());
    let root = text.find("example.com/index.html").unwrap();
    let gone = text.find("/gone").unwrap();
    assert!(root < gone);
    assert!(text.contains("HTTP 404 for https://example.com/gone"));
    assert!(text.contains("image/png"));
}

#[test]
fn test_generate_mirror_report_dispatches() {
    let report = sample_report();
    assert_eq!(
        generate_mirror_report(&report, ReportFormat::Text),
        generate_text_report(&report)
    );
    assert_eq!(
        generate_mirror_report(&report, ReportFormat::Json),
        generate_json_report(&report)
    );
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = generate_json_report(&sample_report());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["start_url"], "https://example.com/");
    assert_eq!(value["summary"]["fetched"], 3);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["peak_in_flight"], 2);
}

// ============================================================================
// Formatting Helper Tests
// ============================================================================

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(512), "512 B");
    assert_eq!(format_bytes(1536), "1.5 KiB");
    assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    assert_eq!(format_duration(Duration::from_secs(125)), "2m05s");
}
