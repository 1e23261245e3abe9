//! Key-based symmetric diff of two same-schema files

use crate::error::Result;
use crate::progress::RowProgress;
use crate::resolver::ColumnResolver;
use crate::table::{LazyTable, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Separator between tracked values in a fingerprint
const FINGERPRINT_SEPARATOR: &str = ";";

/// Aggregate diff counts between two files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Keys present in only one of the files
    pub diff_keys: u64,
    /// Keys present in both files whose tracked values differ
    pub diff_extras: u64,
    pub total: u64,
    pub count1: u64,
    pub count2: u64,
    /// `total * 100 / ((count1 + count2) / 2)`, absent when that average is zero
    pub error_rate_percent: Option<f64>,
}

impl DiffReport {
    fn new(diff_keys: u64, diff_extras: u64, count1: u64, count2: u64) -> Self {
        let total = diff_keys + diff_extras;
        let average = (count1 + count2) / 2;
        let error_rate_percent = if average == 0 {
            None
        } else {
            Some(total as f64 * 100.0 / average as f64)
        };
        Self {
            diff_keys,
            diff_extras,
            total,
            count1,
            count2,
            error_rate_percent,
        }
    }

    /// Error rate with two decimals, or `n/a`
    pub fn error_rate_display(&self) -> String {
        match self.error_rate_percent {
            Some(rate) => format!("{:.2}%", rate),
            None => "n/a".to_string(),
        }
    }

    pub fn has_differences(&self) -> bool {
        self.total > 0
    }
}

/// Column positions used to reduce a row to its key and fingerprint
#[derive(Debug, Clone)]
struct KeyColumns {
    primary: usize,
    tracked: Vec<usize>,
}

impl KeyColumns {
    /// Lowercased primary key and lowercased `;`-joined tracked values
    fn extract(&self, row: &Row) -> Result<(String, String)> {
        let key = row.cell(self.primary)?.to_lowercase();
        let tracked = self
            .tracked
            .iter()
            .map(|&i| row.cell(i))
            .collect::<Result<Vec<_>>>()?;
        let fingerprint = tracked.join(FINGERPRINT_SEPARATOR).to_lowercase();
        Ok((key, fingerprint))
    }
}

/// Symmetric diff keyed on one primary column.
///
/// File 1 is reduced to a key -> fingerprint map in one pass; file 2 is then
/// streamed against it. Memory is bounded by the distinct keys of file 1.
/// Keys and fingerprints compare case-insensitively. A key repeated within
/// one file keeps its last fingerprint.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    primary_key: String,
    tracked_columns: Vec<String>,
}

impl DiffEngine {
    pub fn new<S: Into<String>>(
        primary_key: impl Into<String>,
        tracked_columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            primary_key: primary_key.into(),
            tracked_columns: tracked_columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn tracked_columns(&self) -> &[String] {
        &self.tracked_columns
    }

    /// Diff two files on disk. File 2 is only opened after file 1 is consumed.
    pub fn diff_files(
        &self,
        file1: &Path,
        file2: &Path,
        progress: &mut dyn RowProgress,
    ) -> Result<DiffReport> {
        let (keys, count1) = self.load_keys(LazyTable::open(file1)?, progress)?;
        self.reconcile(LazyTable::open(file2)?, keys, count1, progress)
    }

    /// Diff two already-opened tables
    pub fn diff_tables<R1: Read, R2: Read>(
        &self,
        table1: LazyTable<R1>,
        table2: LazyTable<R2>,
        progress: &mut dyn RowProgress,
    ) -> Result<DiffReport> {
        let (keys, count1) = self.load_keys(table1, progress)?;
        self.reconcile(table2, keys, count1, progress)
    }

    fn key_columns(&self, column_names: &[String]) -> Result<KeyColumns> {
        let resolver = ColumnResolver::new(column_names);
        let columns = KeyColumns {
            primary: resolver.resolve(&self.primary_key)?,
            tracked: resolver.resolve_all(self.tracked_columns.as_slice())?,
        };
        log::debug!(
            "diff key '{}' at {}, tracked {:?} at {:?}",
            self.primary_key,
            columns.primary,
            self.tracked_columns,
            columns.tracked
        );
        Ok(columns)
    }

    /// First pass: build key -> fingerprint for every row of file 1
    fn load_keys<R: Read>(
        &self,
        table: LazyTable<R>,
        progress: &mut dyn RowProgress,
    ) -> Result<(HashMap<String, String>, u64)> {
        let columns = self.key_columns(table.column_names())?;
        let source = table.source().to_string();

        let mut keys = HashMap::new();
        let mut count = 0u64;
        for row in table.rows() {
            let (key, fingerprint) = columns.extract(&row?)?;
            keys.insert(key, fingerprint);
            count += 1;
            progress.advance(count);
        }
        progress.finish(count);

        log::info!("{}: {} rows, {} distinct keys", source, count, keys.len());
        Ok((keys, count))
    }

    /// Second pass: stream file 2 against the file 1 map, consuming matches
    fn reconcile<R: Read>(
        &self,
        table: LazyTable<R>,
        mut keys: HashMap<String, String>,
        count1: u64,
        progress: &mut dyn RowProgress,
    ) -> Result<DiffReport> {
        let columns = self.key_columns(table.column_names())?;
        let source = table.source().to_string();

        let mut diff_keys = 0u64;
        let mut diff_extras = 0u64;
        let mut count2 = 0u64;
        for row in table.rows() {
            let (key, fingerprint) = columns.extract(&row?)?;
            count2 += 1;
            match keys.remove(&key) {
                Some(expected) if expected != fingerprint => diff_extras += 1,
                Some(_) => {}
                // Not in file 1, or already reconciled by an earlier duplicate
                None => diff_keys += 1,
            }
            progress.advance(count2);
        }
        progress.finish(count2);

        // Keys never matched in file 2
        diff_keys += keys.len() as u64;

        log::info!("{}: {} rows reconciled", source, count2);
        Ok(DiffReport::new(diff_keys, diff_extras, count1, count2))
    }
}
