//! Follower-count and search-result extraction from SteamDB HTML.
//!
//! SteamDB has no public API, so both extractors are best-effort pattern
//! matches over page markup, tolerant of attribute reordering and digit
//! grouping. Pure functions; all HTTP lives in the client.

use std::sync::LazyLock;

use regex::Regex;

/// First `/app/{id}/` link on a search results page, capturing the id.
static APP_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="/app/(\d+)/"#).expect("valid regex"));

/// A "Followers" label followed by a grouped number within the same chunk of
/// markup, e.g. `Followers</td><td>1,250,000`.
static FOLLOWERS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Followers?\s*(?:</[a-z0-9]+>\s*<[a-z0-9][^>]*>\s*)?([\d,]+)")
        .expect("valid regex")
});

/// `"followers": 123456` inside an embedded script or JSON blob.
static FOLLOWERS_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"followers?"\s*:\s*(\d+)"#).expect("valid regex"));

/// Title cell of the first search result row, e.g. a link body.
static APP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)href="/app/\d+/[^"]*"[^>]*>\s*([^<]+?)\s*<"#).expect("valid regex")
});

/// Extract the first app id from a SteamDB search results page.
#[must_use]
pub(crate) fn first_app_id(html: &str) -> Option<String> {
    APP_LINK_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
}

/// Extract the display name attached to the first app link, if any.
#[must_use]
pub(crate) fn first_app_name(html: &str) -> Option<String> {
    APP_NAME_RE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Extract a follower count from an app page.
///
/// Tries the visible "Followers" label first, then falls back to scanning
/// embedded script JSON. Returns `None` when neither pattern matches.
#[must_use]
pub(crate) fn follower_count(html: &str) -> Option<u64> {
    if let Some(caps) = FOLLOWERS_LABEL_RE.captures(html) {
        if let Ok(count) = caps[1].replace(',', "").parse::<u64>() {
            return Some(count);
        }
    }

    FOLLOWERS_JSON_RE
        .captures(html)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}
