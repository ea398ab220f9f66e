// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use tubecrawl::config::settings::YouTubeSettings;
use tubecrawl::domain::services::metadata_fetcher::{FetchError, VideoMetadataFetcher};
use tubecrawl::infrastructure::youtube_client::YouTubeDataClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, api_key: Option<&str>) -> YouTubeSettings {
    YouTubeSettings {
        api_key: api_key.map(str::to_string),
        api_base_url: server.uri(),
        oembed_url: format!("{}/oembed", server.uri()),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn data_api_maps_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "abc123"))
        .and(query_param("key", "secret"))
        .and(query_param("part", "snippet,contentDetails,statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "snippet": {
                    "title": "A short",
                    "description": "desc",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/abc123/default.jpg" },
                        "high": { "url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg" }
                    }
                },
                "contentDetails": { "duration": "PT1M3S" },
                "statistics": { "viewCount": "160000000" }
            }]
        })))
        .mount(&server)
        .await;

    let client = YouTubeDataClient::new(&settings(&server, Some("secret"))).unwrap();
    let video = client.fetch("abc123").await.unwrap();

    assert_eq!(video.video_id, "abc123");
    assert_eq!(video.title.as_deref(), Some("A short"));
    assert_eq!(video.description.as_deref(), Some("desc"));
    assert_eq!(video.length, Some(63));
    assert_eq!(video.views, Some(160_000_000));
    assert_eq!(video.rating, None);
    assert_eq!(
        video.publish_date.map(|d| d.to_rfc3339()),
        Some("2024-05-01T12:00:00+00:00".to_string())
    );
    assert_eq!(
        video.thumbnail_url.as_deref(),
        Some("https://i.ytimg.com/vi/abc123/hqdefault.jpg")
    );
}

#[tokio::test]
async fn data_api_empty_items_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = YouTubeDataClient::new(&settings(&server, Some("secret"))).unwrap();
    assert!(matches!(
        client.fetch("gone").await,
        Err(FetchError::NotFound(id)) if id == "gone"
    ));
}

#[tokio::test]
async fn data_api_error_status_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = YouTubeDataClient::new(&settings(&server, Some("bad-key"))).unwrap();
    assert!(matches!(
        client.fetch("abc").await,
        Err(FetchError::Upstream(_))
    ));
}

#[tokio::test]
async fn oembed_without_thumbnail_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Only a title" })))
        .mount(&server)
        .await;

    let client = YouTubeDataClient::new(&settings(&server, None)).unwrap();
    let video = client.fetch("xyz").await.unwrap();

    assert_eq!(video.title.as_deref(), Some("Only a title"));
    assert_eq!(
        video.thumbnail_url.as_deref(),
        Some("https://i.ytimg.com/vi/xyz/hq2.jpg")
    );
    assert_eq!(video.length, None);
}

#[tokio::test]
async fn oembed_private_video_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = YouTubeDataClient::new(&settings(&server, Some(""))).unwrap();
    assert!(matches!(
        client.fetch("private").await,
        Err(FetchError::NotFound(_))
    ));
}
