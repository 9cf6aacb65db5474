use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AnalyzerError, Result};

// ── Formats ───────────────────────────────────────────────────────────────────

/// Capture timestamp embedded in export file names, also used for report names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Timestamp of a single message row.
pub const MESSAGE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar dates passed on the command line.
pub const WINDOW_DATE_FORMAT: &str = "%Y-%m-%d";

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse the timestamp segment of an export file name (`2024-01-15-09-30-00`).
///
/// `name` is the full file name and is only used for error reporting.
pub fn parse_file_timestamp(segment: &str, name: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(segment, FILE_DATE_FORMAT).map_err(|source| {
        AnalyzerError::FileNameTimestamp {
            name: name.to_string(),
            source,
        }
    })
}

/// Parse a message timestamp (`2024-01-15 09:30:00`).
pub fn parse_message_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, MESSAGE_DATE_FORMAT).map_err(|source| {
        AnalyzerError::MessageTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_window_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, WINDOW_DATE_FORMAT).map_err(|source| {
        AnalyzerError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
