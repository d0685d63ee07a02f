use std::collections::HashMap;

use chrono::NaiveDate;

use crate::range::DateRange;
use crate::types::{DailyFollowerRow, DailyMentionRow, MergedRow};

/// Left-join both aggregated streams onto the unified date backbone.
///
/// Produces exactly one [`MergedRow`] per date of `range`, ascending, looking
/// rows up by exact date equality. Dates missing from a stream are filled
/// with zero: absence of data is deliberately treated as "no activity", not
/// "unknown". Deterministic, pure function of its three inputs.
#[must_use]
pub fn merge(
    follower_rows: &[DailyFollowerRow],
    mention_rows: &[DailyMentionRow],
    range: &DateRange,
) -> Vec<MergedRow> {
    let followers: HashMap<NaiveDate, u64> = follower_rows
        .iter()
        .map(|r| (r.date, r.followers))
        .collect();
    let mentions: HashMap<NaiveDate, u64> = mention_rows
        .iter()
        .map(|r| (r.date, r.mentions))
        .collect();

    range
        .iter()
        .map(|date| MergedRow {
            date,
            steam_followers_count: followers.get(&date).copied().unwrap_or(0),
            mentions_in_social_media: mentions.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
