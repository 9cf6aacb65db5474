//! Ranked report output.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use kakao_core::error::{AnalyzerError, Result};
use kakao_core::formatting::{render_report, report_file_name};
use kakao_core::models::ReportEntry;
use tracing::info;

/// Write `entries` to a new `<YYYY-MM-DD-HH-MM-SS>.txt` in `output_dir`,
/// named after the current local time.
pub fn write_report(entries: &[ReportEntry], output_dir: &str) -> Result<PathBuf> {
    write_report_at(entries, output_dir, Local::now().naive_local())
}

/// Same as [`write_report`] with an explicit timestamp for the file name.
///
/// Trailing `/` characters on `output_dir` are ignored, so an empty or `/`
/// directory both resolve to the filesystem root. An existing file with the
/// same name is truncated.
pub fn write_report_at(
    entries: &[ReportEntry],
    output_dir: &str,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let path = report_path(output_dir, now);
    let write_err = |source: std::io::Error| AnalyzerError::ReportWrite {
        path: path.clone(),
        source,
    };

    let mut file = std::fs::File::create(&path).map_err(write_err)?;
    file.write_all(render_report(entries).as_bytes())
        .map_err(write_err)?;
    file.flush().map_err(write_err)?;

    info!("Wrote {} report lines to {}", entries.len(), path.display());
    Ok(path)
}

fn report_path(output_dir: &str, now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "{}/{}",
        output_dir.trim_end_matches('/'),
        report_file_name(now)
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
