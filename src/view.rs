//! Column projection and row inclusion settings for a single pass

use crate::error::Result;
use crate::filter::{FilterPipeline, RowFilter};
use crate::resolver::ColumnResolver;
use crate::table::Row;

/// What to show from a file: which columns, how many rows, which rows
#[derive(Debug, Clone, Default)]
pub struct View {
    /// Only include these columns, in this order. Duplicates are emitted twice.
    pub select: Option<Vec<String>>,

    /// Stop after this many included rows
    pub take: Option<usize>,

    /// If `None`, every row is included
    pub filters: Option<FilterPipeline>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filters.get_or_insert_with(FilterPipeline::default).push(filter);
        self
    }

    pub fn has_selection(&self) -> bool {
        self.select.is_some()
    }

    pub fn has_filters(&self) -> bool {
        self.filters.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// Indices to emit for a header. Identity when nothing is selected.
    pub fn selected_indices(&self, column_names: &[String]) -> Result<Vec<usize>> {
        match &self.select {
            None => Ok((0..column_names.len()).collect()),
            Some(select) => ColumnResolver::new(column_names).resolve_all(select.as_slice()),
        }
    }

    pub fn is_row_included(&mut self, row: &Row) -> Result<bool> {
        match &mut self.filters {
            None => Ok(true),
            Some(filters) => filters.is_valid(row),
        }
    }
}
