//! Deterministic simulated Reddit mentions.
//!
//! Seeded per `(game, day offset)` so repeated runs produce the same feed.
//! Ids carry a `sim_` prefix so simulated posts are recognizable in raw
//! dumps.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sgt_core::MentionEvent;

const SUBREDDITS: &[&str] = &["gaming", "Steam", "pcgaming", "GameDeals", "tipofmyjoystick"];

fn slug(game_name: &str) -> String {
    game_name.to_lowercase().replace(' ', "_")
}

fn seeded(game_name: &str, salt: u64) -> StdRng {
    let base = game_name
        .to_lowercase()
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    StdRng::seed_from_u64(base.wrapping_add(salt))
}

/// Generates 0–5 mentions per day over the trailing `days` days ending
/// today, oldest first.
#[must_use]
pub fn simulated_mentions(game_name: &str, days: u32) -> Vec<MentionEvent> {
    let now = Utc::now();
    let slug = slug(game_name);
    let mut mentions = Vec::new();

    for offset in (0..days).rev() {
        let date = (now - Duration::days(i64::from(offset))).date_naive();
        let mut rng = seeded(game_name, u64::from(offset));
        let daily: u32 = rng.random_range(0..=5);

        for idx in 0..daily {
            // Keep the timestamp inside its calendar day so a feed of N days
            // spans exactly N dates.
            let created_utc = date
                .and_hms_opt(rng.random_range(0..24), rng.random_range(0..60), 0)
                .expect("hour and minute are in range")
                .and_utc();
            let subreddit = SUBREDDITS[rng.random_range(0..SUBREDDITS.len())];

            mentions.push(MentionEvent {
                id: format!("sim_{slug}_{offset}_{idx}"),
                title: format!("Discussion about {game_name}"),
                subreddit: subreddit.to_owned(),
                author: format!("user_{}", rng.random_range(1..=1_000)),
                created_utc,
                score: rng.random_range(1..=50),
                num_comments: rng.random_range(0..=25),
                url: format!("https://reddit.com/r/{subreddit}/comments/sim_{slug}_{offset}_{idx}"),
            });
        }
    }

    mentions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_is_reproducible() {
        let a = simulated_mentions("Cyberpunk 2077", 14);
        let b = simulated_mentions("Cyberpunk 2077", 14);
        let ids_a: Vec<&str> = a.iter().map(|m| m.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn at_most_five_mentions_per_day() {
        let mentions = simulated_mentions("Hades", 30);
        for offset in 0..30u32 {
            let prefix = format!("sim_hades_{offset}_");
            let count = mentions.iter().filter(|m| m.id.starts_with(&prefix)).count();
            assert!(count <= 5, "day offset {offset} produced {count} mentions");
        }
    }

    #[test]
    fn ids_are_unique_and_sim_prefixed() {
        let mentions = simulated_mentions("Elden Ring", 30);
        let unique: std::collections::HashSet<&str> =
            mentions.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(unique.len(), mentions.len());
        assert!(mentions.iter().all(|m| m.id.starts_with("sim_elden_ring_")));
    }

    #[test]
    fn zero_days_yields_no_mentions() {
        assert!(simulated_mentions("Hades", 0).is_empty());
    }
}
