// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::fake_browser::FakeEngine;
use crate::helpers::fixtures::hashtag_feed;
use std::time::Duration;
use tubecrawl::domain::models::scraped_content::CrawlStatus;
use tubecrawl::engines::traits::{EngineError, SessionConfig};
use tubecrawl::scrape::hashtag::HashtagSearch;
use tubecrawl::scrape::session::CrawlerSession;
use tubecrawl::scrape::wiki::WikiPage;

fn quick_hashtag() -> HashtagSearch {
    HashtagSearch::default()
        .with_scroll_pause(Duration::ZERO)
        .with_max_idle_scrolls(1)
}

#[tokio::test]
async fn launch_failure_is_the_only_error() {
    let engine = FakeEngine::unlaunchable();
    let result = CrawlerSession::open(&engine, &SessionConfig::for_host("www.youtube.com")).await;
    assert!(matches!(result, Err(EngineError::Launch(_))));
}

#[tokio::test]
async fn scrape_navigates_then_runs_strategy() {
    let engine = FakeEngine::serving(hashtag_feed(&["조회수 2000만회", "조회수 12회"]));
    let session = CrawlerSession::open(&engine, &SessionConfig::for_host("www.youtube.com"))
        .await
        .unwrap();

    let url = HashtagSearch::url_for("shorts");
    let result = session.scrape(&url, &quick_hashtag(), 10).await;

    assert_eq!(result.length(), 1);
    assert_eq!(result.contents()[0].view_count, 20_000_000);
    assert_eq!(result.status(), CrawlStatus::PartialDueToLimit);
    assert_eq!(engine.tracker.navigations(), vec![url]);

    session.close().await.unwrap();
    assert_eq!(engine.tracker.closed(), 1);
}

#[tokio::test]
async fn navigation_failure_degrades_to_empty_result() {
    let engine = FakeEngine::serving(hashtag_feed(&["조회수 2000만회"])).with_failing_navigation();
    let session = CrawlerSession::open(&engine, &SessionConfig::for_host("www.youtube.com"))
        .await
        .unwrap();

    let result = session
        .scrape("https://www.youtube.com/hashtag/x", &quick_hashtag(), 10)
        .await;

    assert_eq!(result.length(), 0);
    assert_eq!(result.status(), CrawlStatus::PartialDueToFault);
}

#[tokio::test]
async fn dropping_session_releases_browser() {
    let engine = FakeEngine::serving("<html></html>");
    {
        let _session = CrawlerSession::open(&engine, &SessionConfig::for_host("namu.wiki"))
            .await
            .unwrap();
    }

    // Release runs on a spawned task
    for _ in 0..50 {
        if engine.tracker.closed() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(engine.tracker.closed(), 1);
}

#[tokio::test]
async fn explicit_close_is_not_repeated_on_drop() {
    let engine = FakeEngine::serving("<html></html>");
    let session = CrawlerSession::open(&engine, &SessionConfig::for_host("namu.wiki"))
        .await
        .unwrap();
    session.close().await.unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(engine.tracker.opened(), 1);
    assert_eq!(engine.tracker.closed(), 1);
}

#[tokio::test]
async fn fault_screenshot_written_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let png = vec![0x89, b'P', b'N', b'G'];
    let engine = FakeEngine::serving("<html></html>")
        .with_failing_navigation()
        .with_screenshot(png.clone());

    let session = CrawlerSession::open(&engine, &SessionConfig::for_host("namu.wiki"))
        .await
        .unwrap()
        .with_screenshot_dir(dir.path().join("faults"));

    let result = session
        .scrape("https://namu.wiki/w/Rust", &WikiPage::default(), 5)
        .await;
    assert_eq!(result.status(), CrawlStatus::PartialDueToFault);

    let entries: Vec<_> = std::fs::read_dir(dir.path().join("faults"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("namu.wiki-"));
    assert!(name.ends_with(".png"));
    assert_eq!(std::fs::read(&entries[0]).unwrap(), png);
}

#[tokio::test]
async fn session_config_headers_reach_engine() {
    let engine = FakeEngine::serving("<html></html>");
    let config = SessionConfig::for_host("www.youtube.com").with_header("Accept-Language", "ko-KR");
    let session = CrawlerSession::open(&engine, &config).await.unwrap();
    session.close().await.unwrap();

    let configs = engine.tracker.configs.lock().unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].headers.get("Host").map(String::as_str), Some("www.youtube.com"));
    assert_eq!(
        configs[0].headers.get("Referer").map(String::as_str),
        Some("https://www.youtube.com/")
    );
    assert_eq!(
        configs[0].headers.get("Accept-Language").map(String::as_str),
        Some("ko-KR")
    );
}
