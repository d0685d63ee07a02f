use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use sgt_core::{MentionEvent, RedditCredentials};

use crate::error::RedditError;

/// Subreddits searched for game mentions, most general first.
const SEARCH_SUBREDDITS: &[&str] = &[
    "all",
    "gaming",
    "Steam",
    "pcgaming",
    "GameDeals",
    "tipofmyjoystick",
];
const PAGE_LIMIT: usize = 100;
/// Pages fetched per subreddit before moving on.
const PAGE_COUNT: usize = 2;

const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

/// Raw post fields as Reddit reports them. Everything is optional; posts
/// missing the essentials are skipped rather than failing the whole search.
#[derive(Debug, Deserialize)]
struct PostData {
    id: Option<String>,
    title: Option<String>,
    subreddit: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    score: Option<i64>,
    num_comments: Option<u64>,
    url: Option<String>,
    permalink: Option<String>,
}

impl PostData {
    /// Converts a raw post into a [`MentionEvent`], or `None` when the post
    /// lacks an id, title, or timestamp, or predates `cutoff`.
    #[allow(clippy::cast_possible_truncation)]
    fn into_event(self, cutoff: DateTime<Utc>) -> Option<MentionEvent> {
        let id = self.id?;
        let title = self.title?;
        let created_utc = DateTime::from_timestamp(self.created_utc? as i64, 0)?;
        if created_utc < cutoff {
            return None;
        }

        let url = self
            .url
            .or_else(|| self.permalink.map(|p| format!("https://reddit.com{p}")))
            .unwrap_or_default();

        Some(MentionEvent {
            id,
            title,
            subreddit: self.subreddit.unwrap_or_default(),
            author: self.author.unwrap_or_else(|| "[deleted]".to_owned()),
            created_utc,
            score: self.score.unwrap_or(0),
            num_comments: self.num_comments.unwrap_or(0),
            url,
        })
    }
}

/// Reddit API client with a valid access token (client-credentials OAuth).
///
/// Auth and API base URLs are constructor parameters so tests can point the
/// client at a local mock server.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
    user_agent: String,
    api_base: String,
    inter_request_delay_ms: u64,
}

impl RedditClient {
    /// Creates a `RedditClient` against the real Reddit endpoints, pausing
    /// one second between subreddit searches.
    ///
    /// # Errors
    ///
    /// Returns [`RedditError::Auth`] if the token exchange is rejected, or
    /// [`RedditError::Http`] on transport failure.
    pub async fn new(
        credentials: &RedditCredentials,
        user_agent: &str,
    ) -> Result<Self, RedditError> {
        Self::with_bases(
            credentials,
            user_agent,
            DEFAULT_AUTH_BASE,
            DEFAULT_API_BASE,
            1_000,
        )
        .await
    }

    /// Creates a `RedditClient` with explicit auth/API base URLs and
    /// inter-request delay.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub async fn with_bases(
        credentials: &RedditCredentials,
        user_agent: &str,
        auth_base: &str,
        api_base: &str,
        inter_request_delay_ms: u64,
    ) -> Result<Self, RedditError> {
        let client = reqwest::Client::builder().build()?;
        let token = Self::fetch_token(&client, credentials, user_agent, auth_base).await?;

        Ok(Self {
            client,
            token,
            user_agent: user_agent.to_owned(),
            api_base: api_base.trim_end_matches('/').to_owned(),
            inter_request_delay_ms,
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        credentials: &RedditCredentials,
        user_agent: &str,
        auth_base: &str,
    ) -> Result<String, RedditError> {
        let url = format!("{}/api/v1/access_token", auth_base.trim_end_matches('/'));
        let response = client
            .post(url)
            .header("User-Agent", user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RedditError::Auth {
                status: status.as_u16(),
            });
        }

        let token_resp: TokenResponse = response.json().await?;
        Ok(token_resp.access_token)
    }

    /// Searches the configured subreddits for posts mentioning `game_name`
    /// within the last `days` days.
    ///
    /// Tries the name verbatim and as an exact phrase, follows `after`
    /// cursors up to a fixed page budget per subreddit, and deduplicates by
    /// post id (first occurrence wins). Posts older than the cutoff and
    /// posts missing essential fields are skipped. A failing subreddit is
    /// logged and skipped so the remaining subreddits still contribute.
    pub async fn search_game_mentions(&self, game_name: &str, days: u32) -> Vec<MentionEvent> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
        let queries = [game_name.to_owned(), format!("\"{game_name}\"")];

        let mut mentions = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut is_first_search = true;

        for subreddit in SEARCH_SUBREDDITS {
            for query in &queries {
                if !is_first_search && self.inter_request_delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
                }
                is_first_search = false;

                match self.search_subreddit(subreddit, query, cutoff).await {
                    Ok(page) => {
                        for event in page {
                            if seen_ids.insert(event.id.clone()) {
                                mentions.push(event);
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(subreddit, query, error = %err, "subreddit search failed, skipping");
                    }
                }
            }
        }

        tracing::debug!(
            game_name,
            mentions = mentions.len(),
            "collected Reddit mentions"
        );

        mentions
    }

    async fn search_subreddit(
        &self,
        subreddit: &str,
        query: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<MentionEvent>, RedditError> {
        let url = format!("{}/r/{subreddit}/search", self.api_base);
        let mut after: Option<String> = None;
        let mut events = Vec::new();

        for _ in 0..PAGE_COUNT {
            let mut params: Vec<(&str, String)> = vec![
                ("q", query.to_owned()),
                ("restrict_sr", "true".to_owned()),
                ("sort", "new".to_owned()),
                ("limit", PAGE_LIMIT.to_string()),
                ("type", "link".to_owned()),
            ];
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.token))
                .header("User-Agent", &self.user_agent)
                .query(&params)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(RedditError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                });
            }

            let listing: Listing = response.json().await?;
            let page_len = listing.data.children.len();
            let mut in_window = 0usize;

            for post in listing.data.children {
                if let Some(event) = post.data.into_event(cutoff) {
                    in_window += 1;
                    events.push(event);
                }
            }

            after = listing.data.after;
            // Results are newest-first; a page with no in-window hits means
            // the rest of the listing is older than the cutoff.
            if after.is_none() || (page_len > 0 && in_window == 0) {
                break;
            }
        }

        Ok(events)
    }
}
