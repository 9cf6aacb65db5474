//! CSV loading for KakaoTalk chat exports.
//!
//! An export is a UTF-8 CSV file whose first row is a header and whose
//! remaining rows are `timestamp,sender,message`.

use std::path::Path;

use kakao_core::error::{AnalyzerError, Result};
use kakao_core::models::ChatRow;
use tracing::debug;

/// Number of fields every data row must carry.
const FIELDS_PER_ROW: usize = 3;

/// Read every data row of the export at `path`, in file order.
///
/// The first row is dropped without looking at its fields, but it must still
/// decode. Quoted fields may contain commas and line breaks. A blank line is
/// a row with no fields: it counts as the dropped first row when it comes
/// first, and aborts the read anywhere else, like any row that does not have
/// exactly three fields.
pub fn read_chat_rows(path: &Path) -> Result<Vec<ChatRow>> {
    let bytes = std::fs::read(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let csv_err = |source: csv::Error| AnalyzerError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let shape_err = |line: u64, fields: usize| AnalyzerError::RowShape {
        path: path.to_path_buf(),
        line,
        fields,
    };

    let mut rows: Vec<ChatRow> = Vec::new();
    // Rows seen so far, blank lines included.
    let mut seen = 0usize;
    // Offset just past the last byte of the previous record.
    let mut content_end: Option<usize> = None;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record).map_err(csv_err)? {
        let start = record.position().map_or(0, |p| p.byte() as usize).min(bytes.len());
        let content_start = start + leading_line_breaks(&bytes[start..]);

        let gap_start = content_end.unwrap_or(0);
        for line in blank_lines(&bytes, gap_start, content_start, content_end.is_some()) {
            if seen > 0 {
                return Err(shape_err(line, 0));
            }
            seen += 1;
        }

        let end = (reader.position().byte() as usize).clamp(content_start, bytes.len());
        content_end = Some(end - trailing_line_breaks(&bytes[content_start..end]));

        if seen > 0 {
            if record.len() != FIELDS_PER_ROW {
                return Err(shape_err(line_at(&bytes, content_start), record.len()));
            }
            rows.push(record.deserialize(None).map_err(csv_err)?);
        }
        seen += 1;
    }

    let gap_start = content_end.unwrap_or(0);
    for line in blank_lines(&bytes, gap_start, bytes.len(), content_end.is_some()) {
        if seen > 0 {
            return Err(shape_err(line, 0));
        }
        seen += 1;
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ── Line bookkeeping ──────────────────────────────────────────────────────────

fn is_line_break(b: &u8) -> bool {
    matches!(b, b'\r' | b'\n')
}

fn leading_line_breaks(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| is_line_break(b)).count()
}

fn trailing_line_breaks(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|b| is_line_break(b)).count()
}

/// Count line breaks; `\r\n`, `\r` and `\n` each end one line.
fn count_line_breaks(bytes: &[u8]) -> u64 {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }
    count
}

/// 1-based line number of the byte at `offset`.
fn line_at(bytes: &[u8], offset: usize) -> u64 {
    count_line_breaks(&bytes[..offset]) + 1
}

/// Line numbers of the empty lines in `bytes[from..to]`, a run of line breaks.
///
/// After a record the first break only terminates that record.
fn blank_lines(bytes: &[u8], from: usize, to: usize, after_record: bool) -> Vec<u64> {
    let breaks = count_line_breaks(&bytes[from..to]);
    let blanks = if after_record {
        breaks.saturating_sub(1)
    } else {
        breaks
    };
    let first = line_at(bytes, from) + u64::from(after_record);
    (first..first + blanks).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_and_drops_header() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n\
             2024-01-01 10:00:00,A,hi\n\
             2024-01-01 11:00:00,B,yo\n",
        );

        let rows = read_chat_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                ChatRow::new("2024-01-01 10:00:00", "A", "hi"),
                ChatRow::new("2024-01-01 11:00:00", "B", "yo"),
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\r\n2024-01-01 10:00:00,A,hi\r\n2024-01-01 11:00:00,B,yo\r\n",
        );
        assert_eq!(read_chat_rows(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_no_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,A,hi",
        );
        assert_eq!(read_chat_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_first_row_dropped_even_if_data() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "2024-01-01 09:00:00,A,first\n2024-01-01 10:00:00,B,second\n",
        );

        let rows = read_chat_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sender, "B");
    }

    #[test]
    fn test_header_with_other_width_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Exported chat\n2024-01-01 10:00:00,A,hi\n",
        );
        assert_eq!(read_chat_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_quoted_message_with_comma_and_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,\"Kim, J\",\"hello,\n\nworld\"\n",
        );

        let rows = read_chat_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sender, "Kim, J");
        assert_eq!(rows[0].body, "hello,\n\nworld");
    }

    #[test]
    fn test_korean_text() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,민수,안녕하세요\n",
        );
        assert_eq!(read_chat_rows(&path).unwrap()[0].sender, "민수");
    }

    #[test]
    fn test_short_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,A,hi\n2024-01-01 11:00:00,B\n",
        );

        let err = read_chat_rows(&path).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowShape { line: 3, fields: 2, .. }
        ));
    }

    #[test]
    fn test_long_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,A,hi,extra\n",
        );
        assert!(matches!(
            read_chat_rows(&path).unwrap_err(),
            AnalyzerError::RowShape { fields: 4, .. }
        ));
    }

    #[test]
    fn test_blank_line_between_rows_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\n2024-01-01 10:00:00,A,hi\n\n2024-01-01 11:00:00,B,yo\n",
        );

        let err = read_chat_rows(&path).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::RowShape { line: 3, fields: 0, .. }
        ));
    }

    #[test]
    fn test_trailing_blank_line_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "Date,User,Message\r\n2024-01-01 10:00:00,A,hi\r\n\r\n",
        );
        assert!(matches!(
            read_chat_rows(&path).unwrap_err(),
            AnalyzerError::RowShape { line: 3, fields: 0, .. }
        ));
    }

    #[test]
    fn test_leading_blank_line_takes_the_header_slot() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chat.csv",
            "\nDate,User,Message\n2024-01-01 10:00:00,A,hi\n",
        );

        // The blank line is dropped in place of the header, which becomes data.
        let rows = read_chat_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                ChatRow::new("Date", "User", "Message"),
                ChatRow::new("2024-01-01 10:00:00", "A", "hi"),
            ]
        );
    }

    #[test]
    fn test_only_blank_line() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chat.csv", "\n");
        assert!(read_chat_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.csv");
        let mut bytes = b"Date,User,Message\n2024-01-01 10:00:00,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",hi\n");
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            read_chat_rows(&path).unwrap_err(),
            AnalyzerError::Csv { .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_in_header_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.csv");
        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(b",U,M\n2024-01-01 10:00:00,A,hi\n");
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            read_chat_rows(&path).unwrap_err(),
            AnalyzerError::Csv { .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_chat_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, AnalyzerError::FileRead { .. }));
    }

    #[test]
    fn test_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chat.csv", "Date,User,Message\n");
        assert!(read_chat_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn test_count_line_breaks() {
        assert_eq!(count_line_breaks(b""), 0);
        assert_eq!(count_line_breaks(b"\r\n\r\n"), 2);
        assert_eq!(count_line_breaks(b"\n\r\r\n"), 3);
        assert_eq!(line_at(b"a\nb\r\nc", 5), 3);
    }
}
