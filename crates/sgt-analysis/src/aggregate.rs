use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use sgt_core::{FollowerObservation, MentionEvent};

use crate::types::{DailyFollowerRow, DailyMentionRow};

/// Collapse follower observations into one row per calendar date.
///
/// Within a date group the chronologically last observation wins; on equal
/// timestamps the later entry in input order wins. Empty input yields an
/// empty vector, not an error. Output is sorted by date, though the merger
/// does not rely on that.
#[must_use]
pub fn aggregate_followers(observations: &[FollowerObservation]) -> Vec<DailyFollowerRow> {
    let mut latest: BTreeMap<chrono::NaiveDate, (DateTime<Utc>, u64)> = BTreeMap::new();

    for obs in observations {
        let date = obs.observed_at.date_naive();
        match latest.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert((obs.observed_at, obs.follower_count));
            }
            Entry::Occupied(mut slot) => {
                if obs.observed_at >= slot.get().0 {
                    slot.insert((obs.observed_at, obs.follower_count));
                }
            }
        }
    }

    latest
        .into_iter()
        .map(|(date, (_, followers))| DailyFollowerRow { date, followers })
        .collect()
}

/// Collapse mention events into one row per UTC calendar date, counting
/// events and summing scores and comment counts.
///
/// Events are deduplicated by `id` before grouping; the first occurrence in
/// input order wins. Empty input yields an empty vector.
#[must_use]
pub fn aggregate_mentions(events: &[MentionEvent]) -> Vec<DailyMentionRow> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut daily: BTreeMap<chrono::NaiveDate, DailyMentionRow> = BTreeMap::new();

    for event in events {
        if !seen_ids.insert(event.id.as_str()) {
            continue;
        }

        let date = event.created_utc.date_naive();
        let row = daily.entry(date).or_insert(DailyMentionRow {
            date,
            mentions: 0,
            total_score: 0,
            total_comments: 0,
        });
        row.mentions += 1;
        row.total_score += event.score;
        row.total_comments += event.num_comments;
    }

    daily.into_values().collect()
}
