//! Line-oriented header edits: add, replace, delete and rename

use crate::error::Result;
use crate::progress::RowProgress;
use crate::resolver::names_match;
use crate::table;
use std::io::{BufRead, BufReader, Read, Write};

/// A change to the first line of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderEdit {
    /// Write a new header line before the existing first line
    Add(String),
    /// Drop the first line and write a new header in its place
    Replace(String),
    /// Drop the first line
    Delete,
    /// Rename one column of the existing header
    Rename { from: String, to: String },
}

/// Apply a header edit to `input`, copying every other line verbatim to `out`.
/// Returns the number of lines read.
pub fn edit_header<R: Read, W: Write>(
    input: R,
    edit: &HeaderEdit,
    out: &mut W,
    progress: &mut dyn RowProgress,
) -> Result<u64> {
    let lines = apply_edit(BufReader::new(input), edit, out, progress)?;
    log::info!("header edited, {} lines copied", lines);
    Ok(lines)
}

fn apply_edit<B: BufRead, W: Write>(
    mut reader: B,
    edit: &HeaderEdit,
    out: &mut W,
    progress: &mut dyn RowProgress,
) -> Result<u64> {
    let mut line = Vec::new();
    let mut count = 0u64;

    if reader.read_until(b'\n', &mut line)? > 0 {
        count += 1;
        let first = String::from_utf8_lossy(trim_line_ending(&line)).into_owned();
        let delimiter = table::sniff_delimiter(first.as_bytes()) as char;

        match edit {
            HeaderEdit::Add(header) => {
                write_line(out, &match_delimiter(header, delimiter))?;
                write_line(out, &first)?;
            }
            HeaderEdit::Replace(header) => write_line(out, &match_delimiter(header, delimiter))?,
            HeaderEdit::Delete => {}
            HeaderEdit::Rename { from, to } => {
                write_line(out, &rename_column(&first, delimiter, from, to))?
            }
        }
    } else if let HeaderEdit::Add(header) | HeaderEdit::Replace(header) = edit {
        write_line(out, header)?;
    }

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        count += 1;
        out.write_all(trim_line_ending(&line))?;
        out.write_all(b"\n")?;
        progress.advance(count);
    }
    progress.finish(count);
    out.flush()?;
    Ok(count)
}

/// Headers are given comma-separated; convert for tab-separated files
fn match_delimiter(header: &str, delimiter: char) -> String {
    if delimiter == ',' {
        header.to_string()
    } else {
        header.replace(',', &delimiter.to_string())
    }
}

/// Rewrite a header line, stripping quotes and renaming matching columns
fn rename_column(header: &str, delimiter: char, from: &str, to: &str) -> String {
    header
        .split(delimiter)
        .map(|name| {
            let name = strip_quotes(name);
            if names_match(name, from) {
                to
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

fn strip_quotes(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .unwrap_or(name)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn write_line<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
