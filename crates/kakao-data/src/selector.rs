//! Chat export discovery.
//!
//! Picks the newest `KakaoTalk_Chat_<YYYY-MM-DD-HH-MM-SS>.csv` in a directory
//! by the capture time encoded in its name.

use std::path::Path;

use kakao_core::error::{AnalyzerError, Result};
use kakao_core::models::{ChatExportFile, CHAT_FILE_PREFIX, CHAT_FILE_SUFFIX};
use kakao_core::time_utils::parse_file_timestamp;
use tracing::{debug, trace};

/// Find the export with the latest capture timestamp directly under `dir`.
///
/// Entries are visited in file-name order. The current pick is replaced only
/// by a strictly later timestamp, so on a tie the first entry visited wins.
/// Returns `Ok(None)` when no entry starts with the export prefix.
///
/// A prefixed entry whose timestamp segment does not parse aborts the scan.
pub fn find_latest_chat(dir: &Path) -> Result<Option<ChatExportFile>> {
    let mut latest: Option<ChatExportFile> = None;

    let walker = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| AnalyzerError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.starts_with(CHAT_FILE_PREFIX) {
            trace!("Skipping {}", file_name);
            continue;
        }

        let captured_at = parse_file_timestamp(timestamp_segment(&file_name), &file_name)?;

        let is_newer = latest
            .as_ref()
            .map_or(true, |current| current.captured_at < captured_at);
        if is_newer {
            latest = Some(ChatExportFile {
                path: entry.into_path(),
                file_name,
                captured_at,
            });
        }
    }

    match &latest {
        Some(chat) => debug!("Latest chat export: {} ({})", chat.file_name, chat.captured_at),
        None => debug!("No chat exports under {}", dir.display()),
    }

    Ok(latest)
}

/// The part after the last `_`, without the `.csv` extension.
fn timestamp_segment(file_name: &str) -> &str {
    let last = file_name.rsplit('_').next().unwrap_or(file_name);
    last.strip_suffix(CHAT_FILE_SUFFIX).unwrap_or(last)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
