//! Column name resolution against a file header

use crate::error::{CsvPeekError, Result};

/// Resolves column names to positional indices within a header.
///
/// Matching is case-insensitive. When a header repeats a name, the first
/// occurrence wins.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    column_names: &'a [String],
}

impl<'a> ColumnResolver<'a> {
    pub fn new(column_names: &'a [String]) -> Self {
        Self { column_names }
    }

    /// Resolve a single column name
    pub fn resolve(&self, target: &str) -> Result<usize> {
        resolve(self.column_names, target)
    }

    /// Resolve a set of names, one index per name in the requested order.
    /// Fails without a partial result if any name is missing.
    pub fn resolve_all<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<usize>> {
        targets
            .iter()
            .map(|target| self.resolve(target.as_ref()))
            .collect()
    }

    pub fn column_names(&self) -> &'a [String] {
        self.column_names
    }
}

/// Find the index of `target` in `column_names`, ignoring case
pub fn resolve(column_names: &[String], target: &str) -> Result<usize> {
    column_names
        .iter()
        .position(|name| names_match(name, target))
        .ok_or_else(|| CsvPeekError::column_not_found(target))
}

/// Case-insensitive comparison of two column names
pub fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}
