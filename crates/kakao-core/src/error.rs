use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the KakaoTalk analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The chat directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chat export is not well-formed CSV or is not valid UTF-8.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row does not carry exactly three fields.
    #[error("Row at line {line} of {path} has {fields} fields, expected 3")]
    RowShape {
        path: PathBuf,
        line: u64,
        fields: usize,
    },

    /// An export file name carries a malformed capture timestamp.
    #[error("Invalid chat file timestamp in {name}: {source}")]
    FileNameTimestamp {
        name: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A message timestamp did not match `%Y-%m-%d %H:%M:%S`.
    #[error("Invalid message timestamp \"{value}\": {source}")]
    MessageTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A window boundary did not match `%Y-%m-%d`.
    #[error("Invalid date \"{value}\": {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The report file could not be created or written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The day after the end date cannot be represented.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl AnalyzerError {
    /// `true` for failures raised while producing the report file.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, AnalyzerError::ReportWrite { .. })
    }
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
