use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance of a follower observation.
///
/// The collectors tag every observation with how it was obtained so that raw
/// dumps and downstream consumers can tell scraped numbers from fabricated
/// ones. The analysis engine itself never branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Scraped from SteamDB during this run.
    Live,
    /// Served from a previously collected value.
    Cached,
    /// Generated by the deterministic simulator.
    Synthetic,
}

impl Origin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Live => "live",
            Origin::Cached => "cached",
            Origin::Synthetic => "synthetic",
        }
    }
}

/// A single timestamped measurement of a game's Steam follower count.
///
/// Immutable once created. At most one observation exists per
/// `(app_id, observed_at)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerObservation {
    /// Steam application ID (numeric string; synthetic ids are also numeric).
    pub app_id: String,
    /// Display name of the tracked game.
    pub game_name: String,
    /// When the count was observed.
    pub observed_at: DateTime<Utc>,
    pub follower_count: u64,
    pub origin: Origin,
}

/// A single Reddit post mentioning the tracked game.
///
/// `id` is globally unique per post; aggregation deduplicates on it before
/// counting, first occurrence wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionEvent {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    /// Post author; `"[deleted]"` when Reddit no longer reports one.
    pub author: String,
    pub created_utc: DateTime<Utc>,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
}
