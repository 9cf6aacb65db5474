use chrono::NaiveDateTime;

use crate::models::{ReportEntry, REPORT_FILE_EXTENSION};
use crate::time_utils::FILE_DATE_FORMAT;

/// Suffix appended to every count in the report ("times").
pub const COUNT_SUFFIX: &str = "회";

/// Format one report line, without the trailing newline.
///
/// # Examples
///
/// ```
/// use kakao_core::formatting::format_report_line;
/// use kakao_core::models::ReportEntry;
///
/// let entry = ReportEntry { sender: "민수".to_string(), count: 12 };
/// assert_eq!(format_report_line(&entry), "민수 : 12회");
/// ```
pub fn format_report_line(entry: &ReportEntry) -> String {
    format!("{} : {}{}", entry.sender, entry.count, COUNT_SUFFIX)
}

/// Report file name for a run started at `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kakao_core::formatting::report_file_name;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(7, 5, 0)
///     .unwrap();
/// assert_eq!(report_file_name(now), "2024-03-09-07-05-00.txt");
/// ```
pub fn report_file_name(now: NaiveDateTime) -> String {
    format!("{}.{}", now.format(FILE_DATE_FORMAT), REPORT_FILE_EXTENSION)
}

/// Render the whole report body, one newline-terminated line per entry.
pub fn render_report(entries: &[ReportEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format_report_line(entry));
        out.push('\n');
    }
    out
}
