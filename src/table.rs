//! Lazy row access over delimited files

use crate::aggregate::FrequencyTable;
use crate::error::{CsvPeekError, Result};
use crate::progress::RowProgress;
use crate::resolver;
use csv::{ByteRecord, StringRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::rc::Rc;

/// One record of a delimited file, aligned to the shared header
#[derive(Debug, Clone)]
pub struct Row {
    record: StringRecord,
    columns: Rc<[String]>,
}

impl Row {
    pub fn new(record: StringRecord, columns: Rc<[String]>) -> Self {
        Self { record, columns }
    }

    /// Cell value at `index`. Rows shorter than the header fail here rather
    /// than being padded.
    pub fn cell(&self, index: usize) -> Result<&str> {
        self.record.get(index).ok_or_else(|| {
            let line = self
                .record
                .position()
                .map(|p| p.line().to_string())
                .unwrap_or_else(|| "?".to_string());
            CsvPeekError::data_processing(format!(
                "row at line {} has {} cells, column index {} is out of range",
                line,
                self.record.len(),
                index
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }
}

/// A delimited file opened for a single streaming pass.
///
/// The header is read on construction. Data rows are parsed only as the
/// iterator returned by [`LazyTable::rows`] is pulled.
pub struct LazyTable<R: Read = BufReader<File>> {
    source: String,
    delimiter: u8,
    columns: Rc<[String]>,
    reader: csv::Reader<R>,
}

impl LazyTable<BufReader<File>> {
    /// Open a CSV or TSV file, inferring the delimiter from its first line
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_file(path)?;
        let mut buf = BufReader::new(file);

        let mut first_line = Vec::new();
        buf.read_until(b'\n', &mut first_line)?;
        let delimiter = sniff_delimiter(&first_line);
        buf.seek(SeekFrom::Start(0))?;

        log::debug!(
            "Opened {} with delimiter {:?}",
            path.display(),
            delimiter as char
        );
        Self::with_source(buf, delimiter, path.display().to_string())
    }
}

impl<R: Read> LazyTable<R> {
    /// Build a table over any reader with a known delimiter
    pub fn from_reader(reader: R, delimiter: u8) -> Result<Self> {
        Self::with_source(reader, delimiter, "<reader>".to_string())
    }

    fn with_source(reader: R, delimiter: u8, source: String) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Rc<[String]> = reader
            .byte_headers()?
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();

        Ok(Self {
            source,
            delimiter,
            columns,
            reader,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Header names in file order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Case-insensitive header lookup
    pub fn column_index(&self, name: &str) -> Result<usize> {
        resolver::resolve(&self.columns, name)
    }

    /// Consume the table into its single-pass row sequence
    pub fn rows(self) -> Rows<R> {
        Rows {
            records: self.reader.into_byte_records(),
            columns: self.columns,
        }
    }

    /// Count occurrences of each value in one column over the whole file
    pub fn value_frequencies(
        self,
        column: usize,
        ignore_case: bool,
        progress: &mut dyn RowProgress,
    ) -> Result<FrequencyTable> {
        let mut table = FrequencyTable::new(ignore_case);
        let mut seen = 0u64;
        for row in self.rows() {
            let row = row?;
            table.record(row.cell(column)?);
            seen += 1;
            progress.advance(seen);
        }
        progress.finish(seen);
        Ok(table)
    }
}

/// Single-pass iterator over the data rows of a [`LazyTable`]
pub struct Rows<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    columns: Rc<[String]>,
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|record| {
            record
                .map(|record| Row::new(decode_lossy(record), Rc::clone(&self.columns)))
                .map_err(CsvPeekError::from)
        })
    }
}

/// Decode a raw record as UTF-8, replacing invalid sequences with U+FFFD
fn decode_lossy(record: ByteRecord) -> StringRecord {
    match StringRecord::from_byte_record(record) {
        Ok(record) => record,
        Err(err) => {
            let bytes = err.into_byte_record();
            let mut record: StringRecord =
                bytes.iter().map(String::from_utf8_lossy).collect();
            record.set_position(bytes.position().cloned());
            record
        }
    }
}

/// Tab if the sample line contains one, otherwise comma
pub fn sniff_delimiter(first_line: &[u8]) -> u8 {
    if first_line.contains(&b'\t') {
        b'\t'
    } else {
        b','
    }
}

/// Count raw lines without parsing. A trailing line with no newline counts.
pub fn count_lines(path: &Path, progress: &mut dyn RowProgress) -> Result<u64> {
    let mut reader = BufReader::new(open_file(path)?);
    let mut buf = Vec::new();
    let mut count = 0u64;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        count += 1;
        progress.advance(count);
    }
    progress.finish(count);
    Ok(count)
}

/// Open a file, naming the path in the error
pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        CsvPeekError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}
