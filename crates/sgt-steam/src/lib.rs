//! Steam follower collection for the Steam Game Tracker.
//!
//! Resolves a game name to a SteamDB app id (local catalog first, then a web
//! search, then a stable synthetic id), scrapes the current follower count,
//! and backfills a deterministic simulated history anchored at that count.
//! The live/simulated decision lives entirely in [`FollowerSource`] — the
//! analysis engine only ever sees finished `FollowerObservation` sequences
//! with provenance tags.

mod catalog;
mod client;
mod error;
mod parse;
mod retry;
mod simulate;
mod source;

pub use catalog::{catalog_lookup, display_name_for, synthetic_app_id};
pub use client::{AppMatch, SteamDbClient};
pub use error::SteamError;
pub use simulate::{simulated_current_count, simulated_history};
pub use source::{CollectedFollowers, FollowerSource};
