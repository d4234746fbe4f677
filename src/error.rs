use thiserror::Error;

use crate::resolve::BatchStatus;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid phone number: {0:?}")]
    InvalidNumber(String),

    #[error("Cannot {command} while {status}")]
    InvalidTransition {
        command: &'static str,
        status: BatchStatus,
    },

    #[error("No phone numbers loaded")]
    EmptyBatch,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
