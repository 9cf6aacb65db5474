//! Per-sender message counting over a date window.

use kakao_core::error::Result;
use kakao_core::models::{ChatRow, DateWindow, ReportEntry, TallyMap};
use kakao_core::time_utils::parse_message_timestamp;
use tracing::debug;

// ── MessageAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that turns chat rows into ranked tallies.
pub struct MessageAggregator;

impl MessageAggregator {
    /// Count messages per sender for rows inside `window`.
    ///
    /// Every row's timestamp is parsed, in or out of the window; the first
    /// malformed one aborts the count. Senders appear in the returned map in
    /// the order of their first counted message.
    pub fn count_in_window(rows: &[ChatRow], window: &DateWindow) -> Result<TallyMap> {
        let mut tally = TallyMap::new();
        let mut counted = 0usize;

        for row in rows {
            let ts = parse_message_timestamp(&row.timestamp)?;
            if !window.contains(ts) {
                continue;
            }
            *tally.entry(row.sender.clone()).or_insert(0) += 1;
            counted += 1;
        }

        debug!(
            "Counted {} of {} rows from {} senders between {} and {}",
            counted,
            rows.len(),
            tally.len(),
            window.start(),
            window.end()
        );

        Ok(tally)
    }

    /// Rank a tally by count, highest first.
    ///
    /// The sort is stable: equal counts keep the tally's order.
    pub fn rank(tally: &TallyMap) -> Vec<ReportEntry> {
        let mut ranked: Vec<ReportEntry> = tally
            .iter()
            .map(|(sender, &count)| ReportEntry {
                sender: sender.clone(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// Sum of all counts.
    pub fn total(tally: &TallyMap) -> u64 {
        tally.values().sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
