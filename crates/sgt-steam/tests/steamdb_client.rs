//! Integration tests for `SteamDbClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made. Covers the happy paths (search hit, search
//! miss, follower extraction) and every error variant the client can
//! propagate, plus retry behaviour for transient failures.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sgt_steam::{SteamDbClient, SteamError};

/// Builds a `SteamDbClient` suitable for tests: 5-second timeout,
/// descriptive UA, no retries, no inter-request delay.
fn test_client(base_url: &str) -> SteamDbClient {
    SteamDbClient::new(base_url, 5, "sgt-test/0.1", 0, 0, 0)
        .expect("failed to build test SteamDbClient")
}

/// Builds a `SteamDbClient` with retries enabled for retry-specific tests.
fn test_client_with_retries(base_url: &str, max_retries: u32) -> SteamDbClient {
    SteamDbClient::new(base_url, 5, "sgt-test/0.1", max_retries, 0, 0)
        .expect("failed to build test SteamDbClient")
}

/// Minimal search results page with one app row.
fn search_page(app_id: &str, name: &str) -> String {
    format!(
        r#"<table class="table-products">
  <tr class="app" data-appid="{app_id}">
    <td><a href="/app/{app_id}/{slug}/">{name}</a></td>
  </tr>
</table>"#,
        slug = name.replace(' ', "_"),
    )
}

/// Minimal app page carrying a follower figure in a labelled cell.
fn app_page(followers: &str) -> String {
    format!(
        "<div class=\"app-chart\"><table>\
         <tr><td>Followers</td><td>{followers}</td></tr>\
         </table></div>"
    )
}

// ---------------------------------------------------------------------------
// search_app
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_app_returns_first_hit_with_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("a", "app"))
        .and(query_param("q", "Cyberpunk 2077"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page("1091500", "Cyberpunk 2077")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_app("Cyberpunk 2077").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let hit = result.unwrap().expect("expected a search hit");
    assert_eq!(hit.app_id, "1091500");
    assert_eq!(hit.name.as_deref(), Some("Cyberpunk 2077"));
}

#[tokio::test]
async fn search_app_returns_none_when_page_has_no_app_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>No results</body></html>"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_app("No Such Game").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(
        result.unwrap().is_none(),
        "expected None when the page renders no app links"
    );
}

// ---------------------------------------------------------------------------
// current_follower_count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn follower_count_parses_grouped_digits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(app_page("1,250,000")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), 1_250_000);
}

#[tokio::test]
async fn follower_count_missing_when_page_lacks_a_figure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>captcha</body></html>"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_err(), "expected Err for unparseable page");
    match result.unwrap_err() {
        SteamError::FollowerCountMissing { app_id } => {
            assert_eq!(app_id, "1091500");
        }
        other => panic!("expected SteamError::FollowerCountMissing, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Error statuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_propagates_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_err(), "expected Err for 429 response");
    match result.unwrap_err() {
        SteamError::RateLimited {
            retry_after_secs, ..
        } => {
            assert_eq!(
                retry_after_secs, 30,
                "retry_after_secs should match Retry-After header"
            );
        }
        other => panic!("expected SteamError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_err(), "expected Err for 429 response");
    match result.unwrap_err() {
        SteamError::RateLimited {
            retry_after_secs, ..
        } => {
            assert_eq!(retry_after_secs, 60, "expected default Retry-After of 60s");
        }
        other => panic!("expected SteamError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/999999/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("999999").await;

    assert!(result.is_err(), "expected Err for 404 response");
    assert!(
        matches!(result.unwrap_err(), SteamError::NotFound { .. }),
        "expected SteamError::NotFound"
    );
}

#[tokio::test]
async fn unexpected_status_propagates_for_5xx() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_err(), "expected Err for 503 response");
    match result.unwrap_err() {
        SteamError::UnexpectedStatus { status, .. } => {
            assert_eq!(status, 503);
        }
        other => panic!("expected SteamError::UnexpectedStatus, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Retry behaviour
// ---------------------------------------------------------------------------

/// Verifies that a client with `max_retries = 1` succeeds when the server
/// returns a 429 on the first request and 200 on the second.
///
/// Uses `wiremock`'s `up_to_n_times` so the 429 is served exactly once, then
/// requests fall through to the 200 mock.
#[tokio::test]
async fn retries_after_429_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(app_page("42,000")))
        .mount(&server)
        .await;

    // Client with 1 retry and 0-second backoff (so the test doesn't sleep).
    let client = test_client_with_retries(&server.uri(), 1);
    let result = client.current_follower_count("1091500").await;

    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
    assert_eq!(result.unwrap(), 42_000);
}

/// Verifies that when all retries are exhausted (server always returns 429),
/// the final `RateLimited` error is returned instead of hanging.
#[tokio::test]
async fn returns_error_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2) // 1 initial + 1 retry = 2 total requests
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 1);
    let result = client.current_follower_count("1091500").await;

    assert!(
        result.is_err(),
        "expected Err after exhausting retries, got: {result:?}"
    );
    assert!(
        matches!(result.unwrap_err(), SteamError::RateLimited { .. }),
        "expected SteamError::RateLimited after retry exhaustion"
    );
}

/// Non-429 HTTP errors are not retried: a 503 must fail immediately even
/// when retries are available.
#[tokio::test]
async fn unexpected_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/1091500/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 3);
    let result = client.current_follower_count("1091500").await;

    assert!(
        matches!(result.unwrap_err(), SteamError::UnexpectedStatus { .. }),
        "expected SteamError::UnexpectedStatus without retries"
    );
}
