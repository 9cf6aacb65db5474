use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AnalyzerError, Result};
use crate::time_utils::parse_window_date;

/// File-name prefix of every KakaoTalk chat export.
pub const CHAT_FILE_PREFIX: &str = "KakaoTalk_Chat";

/// Extension of a chat export, stripped before parsing the capture timestamp.
pub const CHAT_FILE_SUFFIX: &str = ".csv";

/// Extension of the generated report.
pub const REPORT_FILE_EXTENSION: &str = "txt";

/// A chat export discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExportFile {
    /// Full path to the export.
    pub path: PathBuf,
    /// Bare file name, e.g. `KakaoTalk_Chat_2024-01-15-09-30-00.csv`.
    pub file_name: String,
    /// Capture time encoded in the file name.
    pub captured_at: NaiveDateTime,
}

/// One message row of a chat export.
///
/// The timestamp is kept as text; the aggregator parses it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatRow {
    pub timestamp: String,
    pub sender: String,
    /// Message body. Not used for counting.
    pub body: String,
}

impl ChatRow {
    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }
}

/// Inclusive range `[start 00:00:00, end + 1 day 00:00:00]`.
///
/// The upper bound is midnight *after* the end date and is itself inclusive,
/// so a message stamped exactly at that midnight is counted as well.
/// No `start <= end` check is made; a reversed window simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// Build a window from two `YYYY-MM-DD` strings.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self> {
        let start = parse_window_date(start_date)?;
        let end = parse_window_date(end_date)?;
        Ok(Self {
            start: start.and_time(NaiveTime::MIN),
            end: day_after(end)?.and_time(NaiveTime::MIN),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// `true` when `start <= ts <= end`.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

fn day_after(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| AnalyzerError::DateOutOfRange(date.to_string()))
}

/// Message count per sender, in order of first appearance.
pub type TallyMap = IndexMap<String, u64>;

/// One ranked line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub sender: String,
    pub count: u64,
}
