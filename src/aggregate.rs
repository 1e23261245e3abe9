//! Value-frequency aggregation: histograms and summary stats

use crate::error::{CsvPeekError, Result};
use crate::progress::RowProgress;
use crate::table::{self, LazyTable};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Occurrence count for one observed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Mapping from observed value to occurrence count, in first-seen order.
///
/// Memory grows with the number of distinct values, not with row count.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: IndexMap<String, ValueCount>,
    ignore_case: bool,
    total: u64,
}

impl FrequencyTable {
    /// When `ignore_case` is set, values differing only in case share one
    /// entry reported under the first spelling seen.
    pub fn new(ignore_case: bool) -> Self {
        Self {
            entries: IndexMap::new(),
            ignore_case,
            total: 0,
        }
    }

    pub fn record(&mut self, value: &str) {
        let key = if self.ignore_case {
            value.to_lowercase()
        } else {
            value.to_string()
        };
        self.entries
            .entry(key)
            .or_insert_with(|| ValueCount {
                value: value.to_string(),
                count: 0,
            })
            .count += 1;
        self.total += 1;
    }

    /// Number of values recorded
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct values
    pub fn cardinality(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        let found = if self.ignore_case {
            self.entries.get(&value.to_lowercase())
        } else {
            self.entries.get(value)
        };
        found.map(|v| v.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueCount> {
        self.entries.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramEntry {
    pub value: String,
    pub count: u64,
    /// Truncated integer percentage of all rows
    pub percent: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramReport {
    pub column: String,
    pub total_rows: u64,
    pub entries: Vec<HistogramEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsEntry {
    pub value: String,
    pub count: u64,
    /// Percentage of all rows with two decimals and a trailing `%`
    pub percent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub total_rows: u64,
    pub column_count: usize,
    pub column: String,
    pub entries: Vec<StatsEntry>,
}

/// Histogram of one column's values
pub fn compute_histogram(
    path: &Path,
    column: &str,
    ignore_case: bool,
    progress: &mut dyn RowProgress,
) -> Result<HistogramReport> {
    let table = LazyTable::open(path)?;
    histogram_from_table(table, column, ignore_case, progress)
}

pub fn histogram_from_table<R: Read>(
    table: LazyTable<R>,
    column: &str,
    ignore_case: bool,
    progress: &mut dyn RowProgress,
) -> Result<HistogramReport> {
    let idx = table.column_index(column)?;
    let frequencies = table.value_frequencies(idx, ignore_case, progress)?;
    let total_rows = frequencies.total();

    // Integer division: 1 of 3 rows reports 33, not 33.33
    let entries = frequencies
        .iter()
        .map(|vc| HistogramEntry {
            value: vc.value.clone(),
            count: vc.count,
            percent: vc.count * 100 / total_rows,
        })
        .collect();

    log::info!(
        "histogram on '{}': {} rows, {} distinct values",
        column,
        total_rows,
        frequencies.cardinality()
    );
    Ok(HistogramReport {
        column: column.to_string(),
        total_rows,
        entries,
    })
}

/// Value frequencies of the first column, with row-share percentages.
///
/// The row total comes from a raw line count of the file minus the header.
pub fn compute_stats(path: &Path, progress: &mut dyn RowProgress) -> Result<StatsReport> {
    let total_rows = table::count_lines(path, progress)?.saturating_sub(1);
    let table = LazyTable::open(path)?;
    stats_from_table(table, total_rows, progress)
}

pub fn stats_from_table<R: Read>(
    table: LazyTable<R>,
    total_rows: u64,
    progress: &mut dyn RowProgress,
) -> Result<StatsReport> {
    let column_count = table.column_names().len();
    let column = table.column_names().first().cloned().ok_or_else(|| {
        CsvPeekError::invalid_input(format!("{} has no columns", table.source()))
    })?;

    log::debug!(
        "stats over '{}': {} rows x {} columns",
        column,
        total_rows,
        column_count
    );
    let frequencies = table.value_frequencies(0, false, progress)?;

    let entries = frequencies
        .iter()
        .map(|vc| StatsEntry {
            value: vc.value.clone(),
            count: vc.count,
            percent: format_share(vc.count, total_rows),
        })
        .collect();

    Ok(StatsReport {
        total_rows,
        column_count,
        column,
        entries,
    })
}

fn format_share(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", count as f64 * 100.0 / total as f64)
}
