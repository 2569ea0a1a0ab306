// Report generation from mirror results

use crate::mirror::extract_url_path;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use sitemirror_engine::{ContentKind, FetchRecord, MirrorReport};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Counts shown at the top of every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSummary {
    pub fetched: usize,
    pub saved: usize,
    pub failed: usize,
    pub html_pages: usize,
    pub assets: usize,
    pub bytes_written: u64,
    pub links_rewritten: usize,
}

impl MirrorSummary {
    pub fn from_report(report: &MirrorReport) -> Self {
        let count_kind = |kind: ContentKind| {
            report
                .records
                .iter()
                .filter(|r| r.is_saved() && r.kind == Some(kind))
                .count()
        };

        Self {
            fetched: report.fetched(),
            saved: report.saved(),
            failed: report.failed(),
            html_pages: count_kind(ContentKind::Html),
            assets: count_kind(ContentKind::Asset),
            bytes_written: report.bytes_written(),
            links_rewritten: report.records.iter().map(|r| r.links_rewritten).sum(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: MirrorSummary,
    #[serde(flatten)]
    report: &'a MirrorReport,
}

pub fn generate_mirror_report(report: &MirrorReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => generate_text_report(report),
        ReportFormat::Json => generate_json_report(report),
    }
}

pub fn generate_json_report(report: &MirrorReport) -> String {
    let json = JsonReport {
        summary: MirrorSummary::from_report(report),
        report,
    };
    serde_json::to_string_pretty(&json).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

pub fn generate_text_report(report: &MirrorReport) -> String {
    let summary = MirrorSummary::from_report(report);
    let mut out = String::new();

    out.push_str(RULE);
    out.push_str("                           SITEMIRROR REPORT\n");
    out.push_str(RULE);
    out.push('\n');

    out.push_str(&format!("Start URL:    {}\n", report.start_url));
    out.push_str(&format!("Mirrored to:  {}\n", report.root_dir.display()));
    out.push_str(&format!("Max depth:    {}\n", report.max_depth));
    out.push_str(&format!(
        "Concurrency:  {} (peak {} in flight)\n",
        report.concurrency, report.peak_in_flight
    ));
    out.push_str(&format!("Duration:     {}\n", format_duration(report.elapsed)));
    out.push('\n');

    out.push_str("# Summary:\n");
    out.push_str(&format!("  URLs fetched:     {}\n", summary.fetched));
    out.push_str(&format!(
        "  Files saved:      {} ({} pages, {} assets)\n",
        summary.saved, summary.html_pages, summary.assets
    ));
    out.push_str(&format!("  Failed:           {}\n", summary.failed));
    out.push_str(&format!("  Bytes written:    {}\n", format_bytes(summary.bytes_written)));
    out.push_str(&format!("  Links rewritten:  {}\n", summary.links_rewritten));
    out.push('\n');

    out.push_str(RULE);
    out.push('\n');

    let mut records: Vec<&FetchRecord> = report.records.iter().collect();
    records.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.url.cmp(&b.url)));

    for record in records {
        out.push_str(&format_record_line(record));
        out.push('\n');
    }

    out
}

fn format_record_line(record: &FetchRecord) -> String {
    let path = extract_url_path(&record.url);
    let status = colorize_status(record.status_code);
    let mut line = format!("  [{}] {} {}", record.depth, status, path);

    if let Some(ref error) = record.error {
        line.push_str(&format!("  {}", error.red()));
        return line;
    }

    if let Some(ref content_type) = record.content_type
        && record.kind == Some(ContentKind::Asset)
    {
        line.push_str(&format!(" {}", content_type.bright_black()));
    }
    if let Some(ref local) = record.local_path {
        line.push_str(&format!(" -> {}", local.display()));
    }
    line
}

fn colorize_status(status: u16) -> String {
    let text = if status == 0 {
        "ERR".to_string()
    } else {
        status.to_string()
    };
    match status {
        100..=199 => text.white().to_string(),
        200..=299 => text.green().to_string(),
        300..=399 => text.cyan().to_string(),
        400..=499 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

pub fn format_duration(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let whole = elapsed.as_secs();
        format!("{}m{:02}s", whole / 60, whole % 60)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
