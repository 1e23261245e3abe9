//! # csvpeek
//!
//! Streaming preview, filtering, projection, aggregation and key-based diffing
//! of large delimited (CSV/TSV) files. Rows are pulled one at a time; only the
//! diff key map and aggregation counts are kept in memory.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod header;
pub mod output;
pub mod preview;
pub mod progress;
pub mod resolver;
pub mod table;
pub mod view;
pub mod writer;

pub use config::PeekConfig;
pub use diff::{DiffEngine, DiffReport};
pub use error::{CsvPeekError, Result};
pub use filter::{FilterPipeline, RowFilter};
pub use resolver::ColumnResolver;
pub use table::{LazyTable, Row};
pub use view::View;

/// Data rows shown by a plain preview when no row cap is given
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Rows between progress refreshes
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 500_000;
