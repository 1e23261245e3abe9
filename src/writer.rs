//! Filtered, projected CSV output

use crate::error::Result;
use crate::progress::RowProgress;
use crate::table::{LazyTable, Rows};
use crate::view::View;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{Read, Write};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Escape a cell for output.
///
/// Double quotes become single quotes, then the cell is wrapped in double
/// quotes if it contains a comma. Nothing else is escaped. A missing value
/// becomes an empty string.
pub fn escape_cell<'a>(value: impl Into<Option<&'a str>>) -> Cow<'a, str> {
    let value: Option<&'a str> = value.into();
    let Some(value) = value else {
        return Cow::Borrowed("");
    };
    let value: Cow<'a, str> = if value.contains('"') {
        Cow::Owned(value.replace('"', "'"))
    } else {
        Cow::Borrowed(value)
    };
    if value.contains(',') {
        Cow::Owned(format!("\"{}\"", value))
    } else {
        value
    }
}

/// Outcome of a filtered write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub rows_written: u64,
    pub rows_skipped: u64,
    pub stopped_early: bool,
    pub filtered: bool,
}

/// Included rows of a table, projected onto the view's selected columns.
///
/// Ends as soon as the view's `take` cap is reached, without reading further.
pub struct ProjectedRows<R: Read> {
    rows: Rows<R>,
    view: View,
    header: Vec<String>,
    indices: Vec<usize>,
    rows_read: u64,
    rows_emitted: u64,
    rows_skipped: u64,
    stopped_early: bool,
}

/// Apply a view's filters and projection to a table
pub fn apply_filter_and_project<R: Read>(
    table: LazyTable<R>,
    view: View,
) -> Result<ProjectedRows<R>> {
    let indices = view.selected_indices(table.column_names())?;
    let header = indices
        .iter()
        .map(|&i| table.column_names()[i].clone())
        .collect();
    log::debug!("projecting {} onto columns {:?}", table.source(), indices);

    Ok(ProjectedRows {
        rows: table.rows(),
        view,
        header,
        indices,
        rows_read: 0,
        rows_emitted: 0,
        rows_skipped: 0,
        stopped_early: false,
    })
}

impl<R: Read> ProjectedRows<R> {
    /// Names of the projected columns
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    pub fn summary(&self) -> WriteSummary {
        WriteSummary {
            rows_written: self.rows_emitted,
            rows_skipped: self.rows_skipped,
            stopped_early: self.stopped_early,
            filtered: self.view.has_filters(),
        }
    }
}

impl<R: Read> Iterator for ProjectedRows<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped_early {
            return None;
        }
        loop {
            let row = match self.rows.next()? {
                Ok(row) => row,
                Err(e) => return Some(Err(e)),
            };
            self.rows_read += 1;

            match self.view.is_row_included(&row) {
                Ok(true) => {}
                Ok(false) => {
                    self.rows_skipped += 1;
                    continue;
                }
                Err(e) => return Some(Err(e)),
            }

            let projected = self
                .indices
                .iter()
                .map(|&i| row.cell(i).map(str::to_string))
                .collect::<Result<Vec<_>>>();

            if projected.is_ok() {
                self.rows_emitted += 1;
                if let Some(take) = self.view.take {
                    if self.rows_emitted >= take as u64 {
                        self.stopped_early = true;
                    }
                }
            }
            return Some(projected);
        }
    }
}

/// Writes rows as CSV text using the cell escaping policy
pub struct StreamingWriter<W: Write> {
    out: W,
}

impl<W: Write> StreamingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one line of escaped, comma-separated cells
    pub fn write_record<'a, I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            self.out.write_all(escape_cell(cell).as_bytes())?;
        }
        self.out.write_all(LINE_ENDING.as_bytes())?;
        Ok(())
    }

    /// Write the projection header and every projected row
    pub fn write_projection<R: Read>(
        &mut self,
        mut rows: ProjectedRows<R>,
        progress: &mut dyn RowProgress,
    ) -> Result<WriteSummary> {
        self.write_record(rows.header().iter().map(String::as_str))?;
        while let Some(record) = rows.next() {
            let record = record?;
            self.write_record(record.iter().map(String::as_str))?;
            progress.advance(rows.rows_read());
        }
        progress.finish(rows.rows_read());
        self.out.flush()?;

        let summary = rows.summary();
        log::debug!(
            "wrote {} rows, skipped {}, stopped early: {}",
            summary.rows_written,
            summary.rows_skipped,
            summary.stopped_early
        );
        Ok(summary)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
