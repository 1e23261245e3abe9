//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives row counts from streaming passes
pub trait RowProgress {
    /// Called after each row with the running count for the current pass
    fn advance(&mut self, rows: u64);

    /// Called once when a pass ends, including early stops
    fn finish(&mut self, rows: u64);
}

/// Progress sink that ignores every update
#[derive(Debug, Default)]
pub struct NoProgress;

impl RowProgress for NoProgress {
    fn advance(&mut self, _rows: u64) {}

    fn finish(&mut self, _rows: u64) {}
}

/// Spinner-based progress reporter for long scans
#[derive(Debug)]
pub struct ProgressReporter {
    pub rows_pb: Option<ProgressBar>,
    label: String,
    interval: u64,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create a progress reporter for a streaming scan
    pub fn new_for_scan(label: &str, interval: u64) -> Self {
        Self {
            rows_pb: None,
            label: label.to_string(),
            interval: interval.max(1),
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            rows_pb: None,
            label: String::new(),
            interval: u64::MAX,
            show_progress: false,
        }
    }

    /// Lazily create the spinner the first time a refresh is due
    fn ensure_rows_pb(&mut self) {
        if self.show_progress && self.rows_pb.is_none() {
            self.rows_pb = Some(create_spinner(&self.label));
        }
    }
}

impl RowProgress for ProgressReporter {
    fn advance(&mut self, rows: u64) {
        if !self.show_progress || rows % self.interval != 0 {
            return;
        }
        self.ensure_rows_pb();
        if let Some(pb) = &self.rows_pb {
            pb.set_position(rows);
            pb.set_message(format!("{} ({} rows)", self.label, rows));
        }
    }

    fn finish(&mut self, rows: u64) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_and_clear();
            log::debug!("{}: {} rows", self.label, rows);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.rows_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
