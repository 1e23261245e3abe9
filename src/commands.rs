//! Command implementations for csvpeek CLI

use crate::aggregate;
use crate::cli::{parse_where_clause, split_columns, Commands, OutputFormat};
use crate::config::PeekConfig;
use crate::diff::DiffEngine;
use crate::error::{CsvPeekError, Result};
use crate::filter::RowFilter;
use crate::header::{self, HeaderEdit};
use crate::output::{self, JsonFormatter, PrettyPrinter};
use crate::preview;
use crate::progress::ProgressReporter;
use crate::table::{self, LazyTable};
use crate::view::View;
use crate::writer::{self, StreamingWriter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How a `view` invocation presents the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// Filtered, projected CSV (or a raw preview when nothing is filtered)
    Csv,
    /// First matching row, one column per line
    Vertical,
    /// Value frequencies of the first column
    Stats,
    /// Histogram of one column
    Hist(String),
}

impl DisplayMode {
    /// Pick the mode from the mutually exclusive mode flags
    pub fn from_flags(vertical: bool, stats: bool, hist: Option<String>) -> Result<Self> {
        let selected = [vertical, stats, hist.is_some()]
            .iter()
            .filter(|&&on| on)
            .count();
        if selected > 1 {
            return Err(CsvPeekError::malformed_invocation(
                "--vertical, --stats and --hist cannot be combined",
            ));
        }
        Ok(match hist {
            Some(column) => Self::Hist(column),
            None if vertical => Self::Vertical,
            None if stats => Self::Stats,
            None => Self::Csv,
        })
    }
}

/// Options of the `view` command after argument parsing
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub required: Vec<String>,
    pub where_clauses: Vec<String>,
    pub take: Option<usize>,
    pub select: Option<String>,
    pub ignore_case: bool,
    pub out: Option<PathBuf>,
}

impl ViewOptions {
    /// Build the row view: one filter per `--required` and per `--where`
    pub fn build_view(&self) -> Result<View> {
        let mut view = View::new();
        for list in &self.required {
            view = view.with_filter(RowFilter::must_have_columns(split_columns(list)));
        }
        for clause in &self.where_clauses {
            let (column, value) =
                parse_where_clause(clause).map_err(CsvPeekError::malformed_invocation)?;
            view = view.with_filter(RowFilter::where_equals(column, value));
        }
        if let Some(select) = &self.select {
            view = view.with_select(split_columns(select));
        }
        if let Some(take) = self.take {
            view = view.with_take(take);
        }
        Ok(view)
    }
}

/// Execute a command
pub fn execute_command(command: Commands, config: &PeekConfig) -> Result<()> {
    match command {
        Commands::View {
            file,
            required,
            where_clauses,
            take,
            select,
            vertical,
            stats,
            hist,
            ignore_case,
            out,
            format,
        } => {
            let mode = DisplayMode::from_flags(vertical, stats, hist)?;
            let options = ViewOptions {
                required,
                where_clauses,
                take,
                select,
                ignore_case,
                out,
            };
            view_command(&file, mode, &options, &format, config)
        }
        Commands::Diff {
            file1,
            file2,
            primary_key,
            columns,
            format,
        } => diff_command(&file1, &file2, &primary_key, &columns, &format, config),
        Commands::Header {
            file,
            add_header,
            replace_header,
            delete_header,
            rename,
            out,
        } => {
            let edit = header_edit(add_header, replace_header, delete_header, rename)?;
            header_command(&file, &edit, out.as_deref(), config)
        }
    }
}

/// Preview, project, or summarize a single file
pub fn view_command(
    file: &Path,
    mode: DisplayMode,
    options: &ViewOptions,
    format: &str,
    config: &PeekConfig,
) -> Result<()> {
    let format = parse_format(format)?;
    let view = options.build_view()?;
    let mut progress = progress_for(config, "Scanning rows");

    match mode {
        DisplayMode::Csv => {
            reject_same_file(file, options.out.as_deref())?;
            // Input is opened and columns resolved before the sink truncates anything
            if !view.has_selection() && !view.has_filters() {
                let input = table::open_file(file)?;
                let rows = view.take.unwrap_or(config.preview_rows);
                let mut sink = open_output(options.out.as_deref())?;
                let summary = preview::preview_first_rows(input, rows, &mut sink, &mut progress)?;
                sink.flush()?;
                PrettyPrinter::print_preview_summary(&summary);
            } else {
                let table = LazyTable::open(file)?;
                let rows = writer::apply_filter_and_project(table, view)?;
                let mut sink = open_output(options.out.as_deref())?;
                let summary = StreamingWriter::new(&mut sink).write_projection(rows, &mut progress)?;
                sink.flush()?;
                PrettyPrinter::print_write_summary(&summary);
            }
        }
        DisplayMode::Vertical => {
            if view.take.is_some() {
                return Err(CsvPeekError::malformed_invocation(
                    "--vertical only shows 1 row. Can't use with --take.",
                ));
            }
            reject_out(options, "--vertical")?;
            let preview = preview::preview_vertical(file, view)?;
            match format {
                OutputFormat::Pretty => PrettyPrinter::print_vertical(&preview),
                OutputFormat::Json => JsonFormatter::print(&preview)?,
            }
        }
        DisplayMode::Stats => {
            reject_view_options(&view, "--stats")?;
            reject_same_file(file, options.out.as_deref())?;
            let report = aggregate::compute_stats(file, &mut progress)?;
            let mut sink = open_output(options.out.as_deref())?;
            match format {
                OutputFormat::Pretty => {
                    PrettyPrinter::print_stats_banner(&report);
                    output::write_stats_csv(&report, &mut sink)?;
                }
                OutputFormat::Json => writeln!(sink, "{}", JsonFormatter::format(&report)?)?,
            }
            sink.flush()?;
        }
        DisplayMode::Hist(column) => {
            reject_view_options(&view, "--hist")?;
            reject_out(options, "--hist")?;
            let report =
                aggregate::compute_histogram(file, &column, options.ignore_case, &mut progress)?;
            match format {
                OutputFormat::Pretty => PrettyPrinter::print_histogram(&report),
                OutputFormat::Json => JsonFormatter::print(&report)?,
            }
        }
    }

    Ok(())
}

/// Symmetric key-based diff of two files
pub fn diff_command(
    file1: &Path,
    file2: &Path,
    primary_key: &str,
    columns: &str,
    format: &str,
    config: &PeekConfig,
) -> Result<()> {
    let format = parse_format(format)?;
    let engine = DiffEngine::new(primary_key, split_columns(columns));
    let mut progress = progress_for(config, "Diffing rows");

    let report = engine.diff_files(file1, file2, &mut progress)?;
    match format {
        OutputFormat::Pretty => PrettyPrinter::print_diff_report(&report),
        OutputFormat::Json => JsonFormatter::print(&report)?,
    }
    Ok(())
}

/// Rewrite the header line of a file
pub fn header_command(
    file: &Path,
    edit: &HeaderEdit,
    out: Option<&Path>,
    config: &PeekConfig,
) -> Result<()> {
    if let HeaderEdit::Rename { from, to } = edit {
        eprintln!("Renaming {}-->{}", from, to);
    }
    reject_same_file(file, out)?;
    let input = table::open_file(file)?;
    let mut progress = progress_for(config, "Copying lines");
    let mut sink = open_output(out)?;
    header::edit_header(input, edit, &mut sink, &mut progress)?;
    sink.flush()?;
    Ok(())
}

/// Exactly one header edit must be requested
pub fn header_edit(
    add_header: Option<String>,
    replace_header: Option<String>,
    delete_header: bool,
    rename: Option<Vec<String>>,
) -> Result<HeaderEdit> {
    let mut edits = Vec::new();
    if let Some(header) = add_header {
        edits.push(HeaderEdit::Add(header));
    }
    if let Some(header) = replace_header {
        edits.push(HeaderEdit::Replace(header));
    }
    if delete_header {
        edits.push(HeaderEdit::Delete);
    }
    if let Some(names) = rename {
        match <[String; 2]>::try_from(names) {
            Ok([from, to]) => edits.push(HeaderEdit::Rename { from, to }),
            Err(_) => {
                return Err(CsvPeekError::malformed_invocation(
                    "--rename takes a source and a destination column",
                ))
            }
        }
    }

    match edits.len() {
        1 => Ok(edits.remove(0)),
        0 => Err(CsvPeekError::malformed_invocation(
            "specify one of --add-header, --replace-header, --delete-header or --rename",
        )),
        _ => Err(CsvPeekError::malformed_invocation(
            "only one header edit can be applied at a time",
        )),
    }
}

fn reject_view_options(view: &View, mode: &str) -> Result<()> {
    if view.take.is_some() || view.has_selection() || view.has_filters() {
        return Err(CsvPeekError::malformed_invocation(format!(
            "unsupported command line switches for {}: --take, --select, --required and --where are not allowed",
            mode
        )));
    }
    Ok(())
}

fn reject_out(options: &ViewOptions, mode: &str) -> Result<()> {
    if options.out.is_some() {
        return Err(CsvPeekError::malformed_invocation(format!(
            "--out is not supported with {}",
            mode
        )));
    }
    Ok(())
}

/// Writing over the file being read would truncate it before it is read
fn reject_same_file(input: &Path, out: Option<&Path>) -> Result<()> {
    let Some(out) = out else {
        return Ok(());
    };
    // An output path that does not exist yet cannot be the input
    let (Ok(input), Ok(out)) = (fs::canonicalize(input), fs::canonicalize(out)) else {
        return Ok(());
    };
    if input == out {
        return Err(CsvPeekError::malformed_invocation(format!(
            "--out {} is the input file",
            out.display()
        )));
    }
    Ok(())
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).map_err(CsvPeekError::malformed_invocation)
}

fn progress_for(config: &PeekConfig, label: &str) -> ProgressReporter {
    if config.show_progress {
        ProgressReporter::new_for_scan(label, config.progress_interval)
    } else {
        ProgressReporter::new_minimal()
    }
}

/// Buffered output to a file, or to stdout when no path is given
fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match out {
        Some(path) => {
            log::debug!("Writing output to {}", path.display());
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
