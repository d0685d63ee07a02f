use std::time::Duration;

use reqwest::Client;

use crate::error::SteamError;
use crate::parse;
use crate::retry::retry_with_backoff;

/// A search hit from SteamDB's app search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMatch {
    /// Numeric Steam app id as it appears in `/app/{id}/` links.
    pub app_id: String,
    /// Display name scraped from the result row, when present.
    pub name: Option<String>,
}

/// HTTP client for SteamDB's public search and app pages.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient errors (429, network failures) are automatically
/// retried with exponential backoff up to `max_retries` additional attempts.
///
/// The base URL is configurable so tests can point the client at a local
/// mock server.
pub struct SteamDbClient {
    client: Client,
    base_url: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
    /// Pause between consecutive page fetches, to stay polite to the host.
    inter_request_delay_ms: u64,
}

impl SteamDbClient {
    /// Creates a `SteamDbClient` with configured timeout, `User-Agent`, and
    /// retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors (429, network errors). Set to `0` to
    /// disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`SteamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
        inter_request_delay_ms: u64,
    ) -> Result<Self, SteamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_secs,
            inter_request_delay_ms,
        })
    }

    /// Delay callers should observe between consecutive requests.
    pub(crate) fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }

    /// Searches SteamDB for an app by name and returns the first result.
    ///
    /// Returns `Ok(None)` when the search page renders no app links, which is
    /// how SteamDB reports "no results".
    ///
    /// # Errors
    ///
    /// - [`SteamError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`SteamError::NotFound`] — HTTP 404 (not retried).
    /// - [`SteamError::UnexpectedStatus`] — any other non-2xx status (not retried).
    /// - [`SteamError::Http`] — network or TLS failure after all retries exhausted.
    pub async fn search_app(&self, game_name: &str) -> Result<Option<AppMatch>, SteamError> {
        let url = self.search_url(game_name);
        let body = self.fetch_page(&url).await?;
        Ok(parse::first_app_id(&body).map(|app_id| AppMatch {
            app_id,
            name: parse::first_app_name(&body),
        }))
    }

    /// Fetches the app page and extracts its current follower count.
    ///
    /// # Errors
    ///
    /// In addition to the transport errors of [`Self::search_app`], returns
    /// [`SteamError::FollowerCountMissing`] when the page loads but no
    /// follower figure can be located in the markup.
    pub async fn current_follower_count(&self, app_id: &str) -> Result<u64, SteamError> {
        let url = format!("{}/app/{app_id}/", self.base_url);
        let body = self.fetch_page(&url).await?;
        parse::follower_count(&body).ok_or_else(|| SteamError::FollowerCountMissing {
            app_id: app_id.to_owned(),
        })
    }

    /// Fetches a page body with automatic retry on transient errors.
    ///
    /// Retries up to `self.max_retries` times on [`SteamError::RateLimited`]
    /// (HTTP 429) and [`SteamError::Http`] (network failures), using
    /// exponential backoff with a base delay of `self.backoff_base_secs`
    /// seconds.
    async fn fetch_page(&self, url: &str) -> Result<String, SteamError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    let domain = extract_domain(&url);
                    return Err(SteamError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(SteamError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(SteamError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Builds the search URL with the query URL-encoded via `reqwest::Url`.
    fn search_url(&self, game_name: &str) -> String {
        if let Ok(mut url) = reqwest::Url::parse(&format!("{}/search/", self.base_url)) {
            url.query_pairs_mut()
                .append_pair("a", "app")
                .append_pair("q", game_name);
            url.to_string()
        } else {
            // Fallback: build the URL manually if the base is not parseable
            // (e.g. no scheme). Spaces survive unencoded as a last resort.
            tracing::warn!(
                base_url = %self.base_url,
                "base URL is not a valid URL base; using unencoded search query"
            );
            format!("{}/search/?a=app&q={game_name}", self.base_url)
        }
    }
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
fn extract_domain(url: &str) -> String {
    // Avoid pulling in the `url` crate for this minor operation.
    // Strip scheme and take up to the first `/`.
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.split('/').next().unwrap_or(url).to_owned()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
