//! Common test utilities and helpers

use csvpeek::{PeekConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture manager for creating temporary test files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for a file inside the fixture, not created
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Create a test CSV file with sample data
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        self.create_delimited(name, data, ",")
    }

    /// Create a test TSV file with sample data
    pub fn create_tsv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        self.create_delimited(name, data, "\t")
    }

    fn create_delimited(&self, name: &str, data: &[Vec<&str>], delimiter: &str) -> Result<PathBuf> {
        let mut content = String::new();
        for row in data {
            content.push_str(&row.join(delimiter));
            content.push('\n');
        }
        self.create_csv_raw(name, &content)
    }

    /// Create a test CSV file with raw string content
    pub fn create_csv_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a large CSV file for streaming tests
    pub fn create_large_csv(&self, name: &str, rows: usize, cols: usize) -> Result<PathBuf> {
        let mut content = String::new();

        for i in 0..cols {
            if i > 0 {
                content.push(',');
            }
            content.push_str(&format!("col_{}", i));
        }
        content.push('\n');

        for row in 0..rows {
            for col in 0..cols {
                if col > 0 {
                    content.push(',');
                }
                content.push_str(&format!("value_{}_{}", row, col));
            }
            content.push('\n');
        }

        self.create_csv_raw(name, &content)
    }

    /// Read an output file with line endings normalized to LF
    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.path(name))
            .expect("output file should exist")
            .replace("\r\n", "\n")
    }
}

/// Configuration used by tests: no spinners
pub fn test_config() -> PeekConfig {
    PeekConfig {
        show_progress: false,
        ..PeekConfig::default()
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run a csvpeek command and return the result
    pub fn run_command(&self, args: &[&str]) -> Result<()> {
        use clap::Parser;
        use csvpeek::cli::Cli;
        use csvpeek::commands::execute_command;

        let mut cmd_args = vec!["csvpeek"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| csvpeek::CsvPeekError::invalid_input(e.to_string()))?;

        execute_command(cli.command, &test_config())
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) {
        self.run_command(args).expect("Command should succeed");
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> csvpeek::CsvPeekError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    pub fn people_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["Id", "Name", "State", "Age"],
            vec!["1", "Ann", "WA", "34"],
            vec!["2", "Bob", "", "41"],
            vec!["3", "Cid", "OR", "29"],
            vec!["4", "Dee", "WA", ""],
            vec!["5", "Eve", "WA", "52"],
        ]
    }

    pub fn baseline_orders() -> Vec<Vec<&'static str>> {
        vec![
            vec!["order_id", "status", "amount"],
            vec!["A1", "shipped", "10.00"],
            vec!["A2", "pending", "5.50"],
            vec!["A3", "shipped", "7.25"],
            vec!["A4", "cancelled", "1.00"],
        ]
    }

    pub fn updated_orders() -> Vec<Vec<&'static str>> {
        vec![
            vec!["order_id", "status", "amount"],
            vec!["a1", "SHIPPED", "10.00"], // case-only change
            vec!["A2", "shipped", "5.50"],  // status changed
            vec!["A3", "shipped", "7.25"],
            vec!["A5", "pending", "3.00"], // A4 removed, A5 added
        ]
    }
}
