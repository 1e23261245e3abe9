//! Row filters and AND-composed filter pipelines

use crate::error::Result;
use crate::resolver::ColumnResolver;
use crate::table::Row;

/// A predicate over a row.
///
/// Column indices are resolved from the first row's header and cached, so a
/// filter must not be reused across files with different headers.
#[derive(Debug, Clone)]
pub enum RowFilter {
    /// Every listed column must hold a non-blank value
    MustHaveColumns {
        names: Vec<String>,
        indices: Option<Vec<usize>>,
    },
    /// The column must equal `value` exactly (case-sensitive)
    WhereEquals {
        column: String,
        value: String,
        index: Option<usize>,
    },
}

impl RowFilter {
    pub fn must_have_columns<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::MustHaveColumns {
            names: names.into_iter().map(Into::into).collect(),
            indices: None,
        }
    }

    pub fn where_equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::WhereEquals {
            column: column.into(),
            value: value.into(),
            index: None,
        }
    }

    /// Evaluate the filter against a row, resolving columns on first use
    pub fn is_valid(&mut self, row: &Row) -> Result<bool> {
        match self {
            Self::MustHaveColumns { names, indices } => {
                if indices.is_none() {
                    let resolved =
                        ColumnResolver::new(row.column_names()).resolve_all(names.as_slice())?;
                    log::debug!("required columns {:?} resolved to {:?}", names, resolved);
                    *indices = Some(resolved);
                }
                for &idx in indices.iter().flatten() {
                    if row.cell(idx)?.trim().is_empty() {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::WhereEquals {
                column,
                value,
                index,
            } => {
                let idx = match *index {
                    Some(idx) => idx,
                    None => {
                        let idx = ColumnResolver::new(row.column_names()).resolve(column)?;
                        log::debug!("where column '{}' resolved to {}", column, idx);
                        *index = Some(idx);
                        idx
                    }
                };
                Ok(row.cell(idx)? == value.as_str())
            }
        }
    }
}

/// Ordered list of filters combined with logical AND
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<RowFilter>,
}

impl FilterPipeline {
    pub fn new(filters: Vec<RowFilter>) -> Self {
        Self { filters }
    }

    pub fn push(&mut self, filter: RowFilter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True iff every filter accepts the row. Stops at the first rejection.
    pub fn is_valid(&mut self, row: &Row) -> Result<bool> {
        for filter in &mut self.filters {
            if !filter.is_valid(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
