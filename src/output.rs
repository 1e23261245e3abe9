//! Output formatting utilities

use crate::aggregate::{HistogramReport, StatsReport};
use crate::diff::DiffReport;
use crate::error::Result;
use crate::preview::{PreviewSummary, VerticalPreview};
use crate::writer::{StreamingWriter, WriteSummary};
use serde::Serialize;
use std::io::Write;

/// Pretty printer for csvpeek output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print diff counts
    pub fn print_diff_report(report: &DiffReport) {
        println!("              Different keys: {}", report.diff_keys);
        println!(" same keys, different values: {}", report.diff_extras);
        println!("                total errors: {}", report.total);
        println!("            Original records: {},{}", report.count1, report.count2);
        println!("                  Error rate: {}", report.error_rate_display());
    }

    /// Print a histogram, one `value, count, percent%` line per distinct value
    pub fn print_histogram(report: &HistogramReport) {
        println!("Histogram on column '{}'", report.column);
        for entry in &report.entries {
            println!("{}, {}, {}%", entry.value, entry.count, entry.percent);
        }
    }

    /// Print a single row with one `column: value` line per cell
    pub fn print_vertical(preview: &VerticalPreview) {
        println!("[{} columns]", preview.column_count);
        if let Some(cells) = &preview.cells {
            for cell in cells {
                println!("{}: {}", cell.column, cell.value);
            }
        }
    }

    /// Status lines after a filtered write. Goes to stderr so stdout stays CSV.
    pub fn print_write_summary(summary: &WriteSummary) {
        if summary.stopped_early {
            eprintln!(
                "[stopping after {} rows. Use --take to specify more.]",
                summary.rows_written
            );
        } else {
            eprintln!("[File has {} rows]", summary.rows_written);
        }
        if summary.filtered {
            eprintln!("[Where clause skipped {} rows.]", summary.rows_skipped);
        }
    }

    pub fn print_preview_summary(summary: &PreviewSummary) {
        eprintln!();
        eprintln!("Total rows: {}", format_count(summary.total_lines));
    }

    pub fn print_stats_banner(report: &StatsReport) {
        eprintln!(
            "Getting stats. File has {} rows x {} columns.",
            report.total_rows, report.column_count
        );
    }
}

/// Write stats as CSV: `value,count,percent`
pub fn write_stats_csv<W: Write>(report: &StatsReport, out: W) -> Result<()> {
    let mut writer = StreamingWriter::new(out);
    writer.write_record(["value", "count", "percent"])?;
    for entry in &report.entries {
        let count = entry.count.to_string();
        writer.write_record([entry.value.as_str(), count.as_str(), entry.percent.as_str()])?;
    }
    writer.into_inner().flush()?;
    Ok(())
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn print<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", Self::format(value)?);
        Ok(())
    }
}

/// Format a count with thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
