//! Main analysis pipeline for the KakaoTalk analyzer.
//!
//! Select the newest export, read it, count messages per sender inside the
//! date window, rank and write the report.

use std::path::{Path, PathBuf};

use kakao_core::error::Result;
use kakao_core::models::DateWindow;
use tracing::{info, warn};

use crate::aggregator::MessageAggregator;
use crate::reader::read_chat_rows;
use crate::report::write_report;
use crate::selector::find_latest_chat;

// ── Public types ──────────────────────────────────────────────────────────────

/// How a run ended when it did not hit a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The chat directory holds no export.
    NoChatFiles,
    /// Counting succeeded but the report could not be written.
    WriteFailed,
    /// The report was written.
    Written {
        /// Full path of the report file.
        path: PathBuf,
        /// Number of report lines.
        senders: usize,
        /// Number of messages counted inside the window.
        messages: u64,
    },
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline.
///
/// 1. Parse the date window.
/// 2. Pick the newest export under `chat_dir`.
/// 3. Read its rows.
/// 4. Count messages per sender inside the window and rank them.
/// 5. Write the report into `output_dir`.
///
/// Only step 5 is guarded: a write failure yields
/// [`AnalysisOutcome::WriteFailed`]. Every other failure is returned as `Err`.
pub fn analyze(
    chat_dir: &Path,
    start_date: &str,
    end_date: &str,
    output_dir: &str,
) -> Result<AnalysisOutcome> {
    let window = DateWindow::parse(start_date, end_date)?;

    let Some(chat) = find_latest_chat(chat_dir)? else {
        info!("No chat export found in {}", chat_dir.display());
        return Ok(AnalysisOutcome::NoChatFiles);
    };
    info!("Analyzing {}", chat.path.display());

    let rows = read_chat_rows(&chat.path)?;
    let tally = MessageAggregator::count_in_window(&rows, &window)?;
    let ranked = MessageAggregator::rank(&tally);

    match write_report(&ranked, output_dir) {
        Ok(path) => Ok(AnalysisOutcome::Written {
            path,
            senders: ranked.len(),
            messages: MessageAggregator::total(&tally),
        }),
        Err(e) if e.is_write_failure() => {
            warn!("{}", e);
            Ok(AnalysisOutcome::WriteFailed)
        }
        Err(e) => Err(e),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
