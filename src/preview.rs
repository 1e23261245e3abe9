//! Quick looks at a file: raw first lines and a single-row vertical view

use crate::error::Result;
use crate::progress::RowProgress;
use crate::table::LazyTable;
use crate::view::View;
use serde::Serialize;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Result of a raw preview pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSummary {
    pub lines_written: u64,
    /// Every line in the file, header included
    pub total_lines: u64,
}

/// Copy the header line and the first `data_rows` lines after it, then keep
/// scanning to count the remaining lines. No CSV parsing is done.
pub fn preview_first_rows<R: Read, W: Write>(
    input: R,
    data_rows: usize,
    out: &mut W,
    progress: &mut dyn RowProgress,
) -> Result<PreviewSummary> {
    let summary = copy_first_lines(BufReader::new(input), data_rows, out, progress)?;
    log::debug!(
        "{} lines, {} shown",
        summary.total_lines,
        summary.lines_written
    );
    Ok(summary)
}

fn copy_first_lines<B: BufRead, W: Write>(
    mut reader: B,
    data_rows: usize,
    out: &mut W,
    progress: &mut dyn RowProgress,
) -> Result<PreviewSummary> {
    let limit = data_rows as u64 + 1;
    let mut line = Vec::new();
    let mut total_lines = 0u64;
    let mut lines_written = 0u64;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        total_lines += 1;
        if total_lines <= limit {
            out.write_all(&line)?;
            if !line.ends_with(b"\n") {
                out.write_all(b"\n")?;
            }
            lines_written += 1;
        }
        progress.advance(total_lines);
    }
    progress.finish(total_lines);
    out.flush()?;

    Ok(PreviewSummary {
        lines_written,
        total_lines,
    })
}

/// One labelled cell of a vertical preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledCell {
    pub column: String,
    pub value: String,
}

/// The first included row, one column per entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerticalPreview {
    /// Columns in the file, not just the selected ones
    pub column_count: usize,
    /// `None` when no row passes the filters
    pub cells: Option<Vec<LabeledCell>>,
}

pub fn preview_vertical(path: &Path, view: View) -> Result<VerticalPreview> {
    preview_vertical_table(LazyTable::open(path)?, view)
}

/// Label the first row that passes the view's filters.
///
/// Selected columns are shown in file order and at most once.
pub fn preview_vertical_table<R: Read>(
    table: LazyTable<R>,
    mut view: View,
) -> Result<VerticalPreview> {
    let columns = table.column_names().to_vec();
    let mut selected = vec![false; columns.len()];
    for idx in view.selected_indices(&columns)? {
        selected[idx] = true;
    }

    for row in table.rows() {
        let row = row?;
        if !view.is_row_included(&row)? {
            continue;
        }

        let mut cells = Vec::new();
        for (idx, column) in columns.iter().enumerate() {
            if selected[idx] {
                cells.push(LabeledCell {
                    column: column.clone(),
                    value: row.cell(idx)?.to_string(),
                });
            }
        }
        return Ok(VerticalPreview {
            column_count: columns.len(),
            cells: Some(cells),
        });
    }

    Ok(VerticalPreview {
        column_count: columns.len(),
        cells: None,
    })
}
