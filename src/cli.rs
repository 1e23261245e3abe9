//! Command-line interface for csvpeek

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csvpeek")]
#[command(about = "Preview, filter, summarize and diff large CSV/TSV files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $CSVPEEK_CONFIG or ./.csvpeek.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview, filter and project a file, or summarize one of its columns
    View {
        /// Input CSV or TSV file
        file: PathBuf,

        /// Require non-blank values for columns A,B,C (may be repeated)
        #[arg(long = "required", visible_alias = "req", value_name = "A,B,C")]
        required: Vec<String>,

        /// Only include rows where COLUMN equals VALUE (may be repeated)
        #[arg(long = "where", value_name = "COLUMN=VALUE")]
        where_clauses: Vec<String>,

        /// Only include the first N rows that match the filters
        #[arg(long, value_name = "N", value_parser = validate_take)]
        take: Option<usize>,

        /// Only include columns A,B,C, in this order
        #[arg(long, value_name = "A,B,C")]
        select: Option<String>,

        /// Show the first matching row with one column per line
        #[arg(long)]
        vertical: bool,

        /// Show value frequencies of the first column
        #[arg(long)]
        stats: bool,

        /// Show a histogram of the given column
        #[arg(long, value_name = "COLUMN")]
        hist: Option<String>,

        /// Fold case when counting histogram values
        #[arg(long, requires = "hist")]
        ignore_case: bool,

        /// Write resulting CSV to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Report format for stats and histogram: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Count differences between two CSV files of the same schema
    Diff {
        /// First file
        file1: PathBuf,

        /// Second file
        file2: PathBuf,

        /// Primary key column
        primary_key: String,

        /// Comma-separated columns compared when keys match (may be empty)
        columns: String,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Add, replace, delete or rename the header line
    Header {
        /// Input CSV or TSV file
        file: PathBuf,

        /// Add a header row c1,c2,c3 before the first line
        #[arg(long, value_name = "C1,C2,C3")]
        add_header: Option<String>,

        /// Remove the existing header and add c1,c2,c3
        #[arg(long, value_name = "C1,C2,C3")]
        replace_header: Option<String>,

        /// Delete the first line
        #[arg(long)]
        delete_header: bool,

        /// Rename a single column
        #[arg(long, num_args = 2, value_names = ["SRC", "DEST"])]
        rename: Option<Vec<String>>,

        /// Write result to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Split a comma-separated column list, dropping empty entries
pub fn split_columns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a `COLUMN=VALUE` clause on its first `=`
pub fn parse_where_clause(clause: &str) -> Result<(String, String), String> {
    match clause.split_once('=') {
        Some((column, value)) if !column.is_empty() => {
            Ok((column.to_string(), value.to_string()))
        }
        _ => Err(format!(
            "Invalid where clause: '{}'. Expected COLUMN=VALUE",
            clause
        )),
    }
}

/// Validate that the row cap is greater than 0
fn validate_take(s: &str) -> Result<usize, String> {
    let take: usize = s
        .parse()
        .map_err(|_| format!("Invalid row count: '{}'. Must be a positive integer.", s))?;

    if take == 0 {
        return Err("Row count must be greater than 0".to_string());
    }

    Ok(take)
}
