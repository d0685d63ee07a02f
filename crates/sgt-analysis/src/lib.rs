//! Reconciliation and aggregation engine for the Steam Game Tracker.
//!
//! Takes two irregularly sampled streams — Steam follower observations and
//! Reddit mention events — and produces a single gap-free, date-indexed
//! comparison table plus derived summary statistics. Every function in this
//! crate is a pure transformation of its inputs: no network access, no
//! logging, no shared state. Missing dates are zero-filled by policy, so
//! consumers of the merged table cannot distinguish "no activity" from
//! "no data" — callers that care must look at the raw streams.
//!
//! Pipeline: [`aggregate_followers`] / [`aggregate_mentions`] →
//! [`unify_range`] → [`merge`] → [`compute_summary`], wrapped end to end by
//! [`analyze`]. Rendering and file output live in [`report`] and [`export`].

mod aggregate;
mod csv;
mod error;
mod merge;
mod range;
mod types;

pub mod export;
pub mod report;
pub mod stats;

pub use aggregate::{aggregate_followers, aggregate_mentions};
pub use error::AnalysisError;
pub use export::{write_merged_csv, write_raw_followers_csv, write_raw_mentions_csv};
pub use merge::merge;
pub use range::{unify_range, DateRange, FallbackWindow};
pub use report::format_table;
pub use stats::{compute_summary, SummaryStatistics};
pub use types::{DailyFollowerRow, DailyMentionRow, MergedRow};

use sgt_core::{FollowerObservation, MentionEvent};

/// Result of a full analysis run: the merged daily table and its summary.
///
/// `stats` is `None` exactly when `rows` is empty, which cannot happen through
/// [`analyze`] (an empty input pair still yields the fallback window of
/// zero-filled rows) but can when callers merge over a range of their own.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub rows: Vec<MergedRow>,
    pub stats: Option<SummaryStatistics>,
}

/// Run the full reconciliation pipeline over raw collector output.
///
/// `default_window_days` sizes the trailing window (ending today) used when
/// both inputs are empty; the merged table then contains exactly that many
/// zero-filled rows.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRange`] if range unification produces a
/// start date after its end date. This indicates a defect upstream, not bad
/// user input.
pub fn analyze(
    observations: &[FollowerObservation],
    events: &[MentionEvent],
    default_window_days: u32,
) -> Result<Analysis, AnalysisError> {
    let follower_rows = aggregate_followers(observations);
    let mention_rows = aggregate_mentions(events);
    let range = unify_range(
        &follower_rows,
        &mention_rows,
        FallbackWindow::trailing(default_window_days),
    )?;
    let rows = merge(&follower_rows, &mention_rows, &range);
    let stats = compute_summary(&rows);
    Ok(Analysis { rows, stats })
}
