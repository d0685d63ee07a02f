//! Integration tests for `RedditClient`.
//!
//! Uses `wiremock` for both the token exchange and the search endpoints so
//! no real network traffic is made. A single mock server plays both the
//! auth host and the API host.

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sgt_core::RedditCredentials;
use sgt_reddit::{RedditClient, RedditError};

fn test_credentials() -> RedditCredentials {
    RedditCredentials {
        client_id: "test-id".to_owned(),
        client_secret: "test-secret".to_owned(),
    }
}

/// Mounts a successful token exchange on `server`.
async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(basic_auth("test-id", "test-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"access_token": "tok", "token_type": "bearer"})),
        )
        .mount(server)
        .await;
}

/// Builds a client whose auth and API calls both hit `server`, with no
/// inter-request delay.
async fn test_client(server: &MockServer) -> RedditClient {
    RedditClient::with_bases(
        &test_credentials(),
        "sgt-test/0.1",
        &server.uri(),
        &server.uri(),
        0,
    )
    .await
    .expect("failed to build test RedditClient")
}

/// A one-post listing body with the given post id and age in days.
fn listing(post_id: &str, age_days: i64, after: Option<&str>) -> serde_json::Value {
    let created = Utc::now() - chrono::Duration::days(age_days);
    json!({
        "data": {
            "children": [{
                "data": {
                    "id": post_id,
                    "title": "Big patch announced",
                    "subreddit": "gaming",
                    "author": "someone",
                    "created_utc": created.timestamp(),
                    "score": 12,
                    "num_comments": 3,
                    "url": "https://example.com/post",
                    "permalink": "/r/gaming/comments/abc/"
                }
            }],
            "after": after
        }
    })
}

// ---------------------------------------------------------------------------
// Token exchange
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_token_exchange_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = RedditClient::with_bases(
        &test_credentials(),
        "sgt-test/0.1",
        &server.uri(),
        &server.uri(),
        0,
    )
    .await;

    assert!(result.is_err(), "expected Err for rejected token exchange");
    match result.err().expect("checked above") {
        RedditError::Auth { status } => assert_eq!(status, 401),
        other => panic!("expected RedditError::Auth, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// search_game_mentions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_collects_and_deduplicates_across_subreddits() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // Every subreddit/query combination returns the same post; dedup by id
    // must collapse them to one mention.
    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing("abc123", 2, None)))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let mentions = client.search_game_mentions("Cyberpunk 2077", 30).await;

    assert_eq!(mentions.len(), 1, "duplicate post ids must be collapsed");
    assert_eq!(mentions[0].id, "abc123");
    assert_eq!(mentions[0].subreddit, "gaming");
}

#[tokio::test]
async fn posts_older_than_the_cutoff_are_dropped() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing("old000", 45, None)))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let mentions = client.search_game_mentions("Cyberpunk 2077", 30).await;

    assert!(
        mentions.is_empty(),
        "posts outside the window must be dropped"
    );
}

#[tokio::test]
async fn failing_subreddit_is_skipped_and_others_still_contribute() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // r/all errors on every request; the remaining subreddits answer
    // normally. The healthy results must survive.
    Mock::given(method("GET"))
        .and(path("/r/all/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing("real1", 2, None)))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let mentions = client.search_game_mentions("Cyberpunk 2077", 30).await;

    assert_eq!(
        mentions.len(),
        1,
        "one failing subreddit must not sink the whole search"
    );
    assert_eq!(mentions[0].id, "real1");
}

#[tokio::test]
async fn all_subreddits_failing_yields_an_empty_collection() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let mentions = client.search_game_mentions("Cyberpunk 2077", 30).await;

    assert!(mentions.is_empty(), "every subreddit failed");
}

#[tokio::test]
async fn after_cursor_is_followed_for_a_second_page() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // First page carries an `after` cursor, second page (matched on the
    // cursor param) ends the listing.
    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .and(query_param("after", "t3_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing("page2", 1, None)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/r/[^/]+/search$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&listing("page1", 2, Some("t3_cursor"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let mentions = client.search_game_mentions("Hades", 30).await;

    let ids: Vec<String> = mentions.into_iter().map(|m| m.id).collect();
    assert!(ids.contains(&"page1".to_owned()), "missing first page hit");
    assert!(ids.contains(&"page2".to_owned()), "missing second page hit");
}
