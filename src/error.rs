//! Error types for csvpeek operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CsvPeekError>;

#[derive(Error, Debug)]
pub enum CsvPeekError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Can't find column: {name}")]
    ColumnNotFound { name: String },

    #[error("Invalid invocation: {message}")]
    MalformedInvocation { message: String },

    #[error("Data processing error: {message}")]
    DataProcessing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl CsvPeekError {
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    pub fn malformed_invocation(msg: impl Into<String>) -> Self {
        Self::MalformedInvocation {
            message: msg.into(),
        }
    }

    pub fn data_processing(msg: impl Into<String>) -> Self {
        Self::DataProcessing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
