//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → MusicClient → HTTP requests → decoded outcome

use futures::StreamExt;
use hummingkit::decode::FailureCause;
use hummingkit::pagination::{MergePolicy, PaginationFailure};
use hummingkit::{ClientConfig, Completion, MusicClient, ResourceKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MusicClient {
    let config = ClientConfig::builder()
        .developer_token("dev-token")
        .user_token("user-token")
        .base_url(server.uri())
        .build();
    MusicClient::new(&config).unwrap()
}

async fn mount_page(
    server: &MockServer,
    resource: &str,
    offset: &str,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/me/library/{resource}")))
        .and(query_param("offset", offset))
        .and(query_param("limit", "100"))
        .and(header("Authorization", "Bearer dev-token"))
        .and(header("Music-User-Token", "user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Single Request Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_song() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/us/songs/203709340"))
        .and(header("Authorization", "Bearer dev-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "203709340", "type": "songs"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server)
        .catalog_resource("us", ResourceKind::Songs, "203709340")
        .await
        .into_result()
        .unwrap();

    assert_eq!(value["data"][0]["id"], "203709340");
}

#[tokio::test]
async fn test_forbidden_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me/recent/played"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .developer_token("dev-token")
        .base_url(server.uri())
        .build();
    let client = MusicClient::new(&config).unwrap();

    let err = client.recently_played().await.into_result().unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    let message = err.to_string();
    assert!(message.contains("403 Forbidden"));
    assert!(message.contains("music user token"));
}

#[tokio::test]
async fn test_completion_triple() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/storefronts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/storefronts/zz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let (success, error, result) = Completion::from(client.all_storefronts().await).into_parts();
    assert!(success);
    assert!(error.is_none());
    assert_eq!(result, Some(json!({"data": []})));

    let outcome = client.storefront("zz").await;
    assert!(matches!(
        outcome.cause(),
        Some(FailureCause::Status { code: 404, .. })
    ));
    let (success, error, result) = Completion::from(outcome).into_parts();
    assert!(!success);
    assert!(error.is_none());
    assert!(result.is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_network_failure() {
    let config = ClientConfig::builder()
        .developer_token("dev-token")
        .base_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(5))
        .build();
    let client = MusicClient::new(&config).unwrap();

    let outcome = client.all_storefronts().await;
    assert!(matches!(
        outcome.cause(),
        Some(FailureCause::Transport { status: None, .. })
    ));
    assert!(outcome.into_result().unwrap_err().is_retryable());
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_all_library_songs() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "songs",
        "0",
        json!({"data": [{"id": "i.1"}, {"id": "i.2"}], "next": "/v1/me/library/songs?offset=100"}),
    )
    .await;
    mount_page(
        &server,
        "songs",
        "100",
        json!({"data": [{"id": "i.3"}], "next": "/v1/me/library/songs?offset=200"}),
    )
    .await;
    mount_page(&server, "songs", "200", json!({"data": [{"id": "i.4"}]})).await;

    let songs = client_for(&server).fetch_all_library_songs().await.unwrap();
    assert_eq!(
        songs,
        json!([{"id": "i.1"}, {"id": "i.2"}, {"id": "i.3"}, {"id": "i.4"}])
    );
}

#[tokio::test]
async fn test_concurrent_paginations_are_independent() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "songs",
        "0",
        json!({"data": [{"id": "i.1"}], "next": "/v1/me/library/songs?offset=100"}),
    )
    .await;
    mount_page(&server, "songs", "100", json!({"data": [{"id": "i.2"}]})).await;
    mount_page(&server, "playlists", "0", json!({"data": [{"id": "p.1"}]})).await;

    let client = client_for(&server);
    let (songs, playlists) = tokio::join!(
        client.fetch_all_library_songs(),
        client.fetch_all_library_playlists()
    );

    assert_eq!(songs.unwrap(), json!([{"id": "i.1"}, {"id": "i.2"}]));
    assert_eq!(playlists.unwrap(), json!([{"id": "p.1"}]));
}

#[tokio::test]
async fn test_failure_mid_pagination_stops_requests() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "songs",
        "0",
        json!({"data": [{"id": "i.1"}], "next": "/v1/me/library/songs?offset=100"}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/library/songs"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/library/songs"))
        .and(query_param("offset", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_all_library_songs()
        .await
        .unwrap_err();

    assert_eq!(err.partial, json!([{"id": "i.1"}]));
    assert_eq!(err.fetch_cause().and_then(FailureCause::status_code), Some(500));

    let completion = Completion::from(Err::<serde_json::Value, _>(err));
    assert!(!completion.success);
    assert!(completion.result.is_none());
}

#[tokio::test]
async fn test_lenient_merge_from_config() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "playlists",
        "0",
        json!({"data": [{"id": "p.1"}], "next": "/v1/me/library/playlists?offset=25"}),
    )
    .await;
    mount_page(
        &server,
        "playlists",
        "25",
        json!({"data": {"oops": true}, "next": "/v1/me/library/playlists?offset=50"}),
    )
    .await;
    mount_page(&server, "playlists", "50", json!({"data": [{"id": "p.3"}]})).await;

    let config = ClientConfig::builder()
        .developer_token("dev-token")
        .user_token("user-token")
        .base_url(server.uri())
        .merge_policy(MergePolicy::Lenient)
        .build();
    let playlists = MusicClient::new(&config)
        .unwrap()
        .fetch_all_library_playlists()
        .await
        .unwrap();

    assert_eq!(playlists, json!([{"id": "p.1"}, {"id": "p.3"}]));
}

#[tokio::test]
async fn test_page_stream() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "songs",
        "0",
        json!({"data": [{"id": "i.1"}], "next": "/v1/me/library/songs?offset=100"}),
    )
    .await;
    mount_page(&server, "songs", "100", json!({"data": [{"id": "i.2"}]})).await;

    let pages: Vec<_> = client_for(&server)
        .library_songs()
        .unwrap()
        .into_stream()
        .map(|page| page.unwrap())
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].next_offset, "100");
    assert!(pages[1].is_finished);
}

#[tokio::test]
async fn test_cancel_in_flight_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me/library/songs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let paginator = client_for(&server).library_songs().unwrap();
    let handle = paginator.cancel_handle();
    let run = tokio::spawn(paginator.collect());

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let err = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap_err();
    assert!(matches!(err.cause, PaginationFailure::Cancelled));
    assert_eq!(err.pages, 0);
}
