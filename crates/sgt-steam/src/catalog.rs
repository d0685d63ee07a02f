//! Local catalog of well-known games.
//!
//! Consulted before any network call so common lookups never hit SteamDB,
//! and used to seed believable baseline counts for the simulator. Games
//! outside the catalog get a stable synthetic app id derived from the name,
//! so repeated runs for the same title line up.

use sha2::{Digest, Sha256};

/// `(canonical name, app id, baseline follower count)`.
const KNOWN_GAMES: &[(&str, &str, u64)] = &[
    ("cyberpunk 2077", "1091500", 1_250_000),
    ("the witcher 3", "292030", 890_000),
    ("elden ring", "1245620", 750_000),
    ("baldurs gate 3", "1086940", 680_000),
    ("counter-strike 2", "730", 2_100_000),
    ("dota 2", "570", 1_800_000),
    ("grand theft auto v", "271590", 1_950_000),
    ("red dead redemption 2", "1174180", 920_000),
    ("fallout 4", "377160", 730_000),
    ("skyrim", "489830", 840_000),
];

/// Case-insensitive catalog lookup by game name.
///
/// Returns `(app_id, baseline_followers)` for known titles.
#[must_use]
pub fn catalog_lookup(game_name: &str) -> Option<(&'static str, u64)> {
    let needle = game_name.trim().to_lowercase();
    KNOWN_GAMES
        .iter()
        .find(|(name, _, _)| *name == needle)
        .map(|(_, app_id, base)| (*app_id, *base))
}

/// Reverse lookup: a presentable name for a catalog app id, or `Game_{id}`.
#[must_use]
pub fn display_name_for(app_id: &str) -> String {
    KNOWN_GAMES
        .iter()
        .find(|(_, id, _)| *id == app_id)
        .map_or_else(|| format!("Game_{app_id}"), |(name, _, _)| title_case(name))
}

/// Stable synthetic app id for games the catalog and web search both miss.
///
/// Derived from a SHA-256 of the lowercased name, folded into the same
/// 1_000_000..2_000_000 band the original tracker used for fabricated ids,
/// so synthetic ids are recognizable and never collide with low real ids.
#[must_use]
pub fn synthetic_app_id(game_name: &str) -> String {
    let digest = Sha256::digest(game_name.trim().to_lowercase().as_bytes());
    let mut value = 0u64;
    for byte in &digest[..8] {
        value = (value << 8) | u64::from(*byte);
    }
    (value % 1_000_000 + 1_000_000).to_string()
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
