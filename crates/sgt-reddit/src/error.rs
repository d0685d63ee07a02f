use thiserror::Error;

/// Errors from the Reddit mention collector.
#[derive(Debug, Error)]
pub enum RedditError {
    /// Network, TLS, or body-decoding failure from `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token exchange was rejected.
    #[error("Reddit token exchange failed with status {status}")]
    Auth { status: u16 },

    /// A search request returned a non-2xx status.
    #[error("Reddit search returned status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },
}
