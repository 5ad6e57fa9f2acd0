//! HTML summary report
//!
//! The report is staged in `temp.html` and renamed to `<basename>.html` once
//! complete, so a reader never sees a half-written report and no staging
//! file survives a successful run.

use crate::db::{CollectionStats, Database, ReportTable};
use chrono::{DateTime, Local};
use fondscan_core::{FondscanError, OutputLayout, ReportKind, Result};
use fondscan_tools::clamav::VirusScanSummary;
use std::fs;
use std::path::PathBuf;

const STYLE: &str = "body{font-family:sans-serif;margin:2em;}\
table{border-collapse:collapse;margin-bottom:1.5em;}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left;}\
th{background:#eee;}\
.warning{color:#a00;font-weight:bold;}";

/// Everything about the run that is not in the database
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub source: PathBuf,
    pub basename: String,
    pub run_date: DateTime<Local>,
    pub siegfried_version: String,
    pub disk_image: bool,
    /// `None` when the virus scan was skipped
    pub virus_scan: Option<VirusScanSummary>,
}

/// Write `<basename>.html` for the collection in `db`
///
/// # Errors
///
/// Returns `Database` if a query fails or `Io` if the report cannot be
/// written or moved into place
pub fn write_html(db: &Database, context: &ReportContext, layout: &OutputLayout) -> Result<PathBuf> {
    let stats = db.stats()?;
    let mut html = String::new();

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>fondscan report: {name}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>fondscan report: {name}</h1>\n",
        name = escape(&context.basename)
    ));

    render_provenance(&mut html, context);
    render_stats(&mut html, &stats);
    render_virus_scan(&mut html, context.virus_scan.as_ref());
    for kind in ReportKind::ALL {
        render_table(&mut html, kind.title(), &db.report(kind)?);
    }
    html.push_str("</body>\n</html>\n");

    let staging = layout.temp_html();
    let target = layout.html_report();
    fs::write(&staging, html).map_err(|e| FondscanError::io(&staging, e))?;
    fs::rename(&staging, &target).map_err(|e| FondscanError::io(&target, e))?;
    Ok(target)
}

fn render_provenance(html: &mut String, context: &ReportContext) {
    html.push_str("<h2>Provenance</h2>\n<table>\n");
    let input_type = if context.disk_image { "Disk image" } else { "Directory" };
    let rows = [
        ("Source", context.source.display().to_string()),
        ("Accession/identifier", context.basename.clone()),
        ("Input type", input_type.to_string()),
        ("Report date", context.run_date.format("%Y-%m-%d %H:%M:%S %z").to_string()),
        ("Identification tool", context.siegfried_version.clone()),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{label}</th><td>{}</td></tr>\n", escape(&value)));
    }
    html.push_str("</table>\n");
}

fn render_stats(html: &mut String, stats: &CollectionStats) {
    html.push_str("<h2>Statistics</h2>\n<table>\n");
    let date_range = match (&stats.earliest_year, &stats.latest_year) {
        (Some(first), Some(last)) => format!("{first} - {last}"),
        _ => "n/a".to_string(),
    };
    let rows = [
        ("Total files", stats.total_files.to_string()),
        ("Total size", human_size(stats.total_bytes)),
        ("Years last modified", date_range),
        ("Identified file formats", stats.distinct_formats.to_string()),
        ("Unidentified files", stats.unidentified.to_string()),
        ("Files with siegfried warnings", stats.with_warnings.to_string()),
        ("Files with siegfried errors", stats.with_errors.to_string()),
        ("Duplicate files", stats.duplicate_files.to_string()),
        ("Empty files", stats.empty_files.to_string()),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{label}</th><td>{}</td></tr>\n", escape(&value)));
    }
    html.push_str("</table>\n");
}

fn render_virus_scan(html: &mut String, summary: Option<&VirusScanSummary>) {
    html.push_str("<h2>Virus scan</h2>\n");
    match summary {
        None => html.push_str("<p>Virus scan not run.</p>\n"),
        Some(s) if s.is_clean() => {
            html.push_str(&format!(
                "<p>Scanned files: {}. No infections found.</p>\n",
                s.scanned_files
            ));
        }
        Some(s) => {
            html.push_str(&format!(
                "<p class=\"warning\">Scanned files: {}. Infected files: {}. \
                 See logs/viruscheck-log.txt for details.</p>\n",
                s.scanned_files, s.infected_files
            ));
        }
    }
}

fn render_table(html: &mut String, title: &str, table: &ReportTable) {
    html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    if table.rows.is_empty() {
        html.push_str("<p>None found.</p>\n");
        return;
    }

    html.push_str("<table>\n<tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a byte count with binary units, e.g. `4.0 KiB`
#[must_use]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
