use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row per calendar date with follower observations: the chronologically
/// last observation's count for that date. Dates with no observations have no
/// row here — gap filling is the merger's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFollowerRow {
    pub date: NaiveDate,
    pub followers: u64,
}

/// One row per UTC calendar date with mention events: event count plus score
/// and comment sums over all events on that date (after id deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMentionRow {
    pub date: NaiveDate,
    pub mentions: u64,
    pub total_score: i64,
    pub total_comments: u64,
}

/// The canonical merged table row: exactly one per calendar date of the
/// unified range, ascending, with absent dates zero-filled.
///
/// Field names double as the fixed CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub steam_followers_count: u64,
    pub mentions_in_social_media: u64,
}
