//! Reddit mention collection for the Steam Game Tracker.
//!
//! Searches a fixed set of gaming subreddits for posts mentioning a game
//! (client-credentials OAuth, cursor pagination, cutoff filtering) and
//! deduplicates hits by post id. When credentials are absent or the live
//! search comes back empty or failing, [`MentionSource`] degrades to a
//! deterministic simulated feed so downstream analysis always has input.

mod client;
mod error;
mod simulate;
mod source;

pub use client::RedditClient;
pub use error::RedditError;
pub use simulate::simulated_mentions;
pub use source::MentionSource;
