//! Console-style rendering of the merged comparison table.

use std::fmt::Write;

use crate::stats::compute_summary;
use crate::types::MergedRow;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Render the merged table as a fixed-width text report with a trailing
/// summary section.
///
/// At most `max_rows` data rows are shown; when the table is longer the
/// report states exactly how many rows were hidden — rows are never dropped
/// silently. An empty table renders a "no data" notice instead of columns.
#[must_use]
pub fn format_table(rows: &[MergedRow], max_rows: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "STEAM GAME FOLLOWERS vs REDDIT MENTIONS COMPARISON");
    let _ = writeln!(out, "{RULE}");

    if rows.is_empty() {
        let _ = writeln!(out, "No data available to display.");
        return out;
    }

    let shown = rows.len().min(max_rows.max(1));
    if shown < rows.len() {
        let _ = writeln!(
            out,
            "Showing first {shown} of {} rows ({} hidden)",
            rows.len(),
            rows.len() - shown
        );
    }

    let _ = writeln!(
        out,
        "{:<12}  {:>21}  {:>24}",
        "Date", "Steam Followers Count", "Mentions in Social Media"
    );
    for row in &rows[..shown] {
        let _ = writeln!(
            out,
            "{:<12}  {:>21}  {:>24}",
            row.date.format("%Y-%m-%d"),
            row.steam_followers_count,
            row.mentions_in_social_media
        );
    }

    if let Some(stats) = compute_summary(rows) {
        let _ = writeln!(out, "{THIN_RULE}");
        let _ = writeln!(out, "SUMMARY STATISTICS");
        let _ = writeln!(out, "{THIN_RULE}");
        let _ = writeln!(
            out,
            "Steam Followers - Min: {}, Max: {}, Avg: {:.0}",
            stats.steam_followers.min, stats.steam_followers.max, stats.steam_followers.mean
        );
        let _ = writeln!(
            out,
            "Reddit Mentions - Min: {}, Max: {}, Avg: {:.1}",
            stats.reddit_mentions.min, stats.reddit_mentions.max, stats.reddit_mentions.mean
        );
        let _ = writeln!(
            out,
            "Total Reddit Mentions: {}",
            stats.reddit_mentions.total
        );
        let _ = writeln!(
            out,
            "Days with Reddit Activity: {}",
            stats.reddit_mentions.active_days
        );
        match stats.correlation {
            Some(r) => {
                let _ = writeln!(out, "Correlation between followers and mentions: {r:.3}");
            }
            None => {
                let _ = writeln!(
                    out,
                    "Correlation between followers and mentions: unavailable (insufficient variation)"
                );
            }
        }
    }

    let _ = writeln!(out, "{RULE}");
    out
}
