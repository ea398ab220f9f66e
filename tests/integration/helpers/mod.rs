// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod fixtures;

use axum_test::TestServer;
use fake_browser::FakeEngine;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tubecrawl::config::settings::{DatabaseSettings, Settings};
use tubecrawl::domain::services::crawl_service::CrawlService;
use tubecrawl::domain::services::video_service::VideoService;
use tubecrawl::infrastructure::database::connection;
use tubecrawl::infrastructure::repositories::scraped_content_repo_impl::ScrapedContentRepositoryImpl;
use tubecrawl::infrastructure::repositories::video_repo_impl::VideoRepositoryImpl;
use tubecrawl::infrastructure::youtube_client::YouTubeDataClient;
use tubecrawl::presentation::routes;

/// Migrated in-memory SQLite database
pub async fn memory_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: Some(5),
        idle_timeout: None,
    };
    Arc::new(
        connection::connect_and_migrate(&settings)
            .await
            .expect("in-memory database should migrate"),
    )
}

/// Default settings tuned so scroll polling finishes immediately
pub fn test_settings() -> Settings {
    let mut settings = Settings::defaults().expect("default settings should load");
    settings.crawl.scroll_pause_ms = 0;
    settings.crawl.max_idle_scrolls = 1;
    settings.browser.screenshot_dir = None;
    settings
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub engine: Arc<FakeEngine>,
}

/// Router wired to a fake browser, in-memory storage and the given YouTube endpoints
pub async fn create_test_app(engine: FakeEngine, youtube_base_url: &str) -> TestApp {
    let mut settings = test_settings();
    settings.youtube.api_base_url = youtube_base_url.to_string();
    settings.youtube.oembed_url = format!("{}/oembed", youtube_base_url);

    let db = memory_db().await;
    let engine = Arc::new(engine);

    let crawl_service = Arc::new(CrawlService::new(
        engine.clone(),
        Arc::new(ScrapedContentRepositoryImpl::new(db.clone())),
        settings.browser.clone(),
        settings.crawl.clone(),
    ));
    let video_service = Arc::new(VideoService::new(
        Arc::new(VideoRepositoryImpl::new(db.clone())),
        Arc::new(YouTubeDataClient::new(&settings.youtube).expect("client should build")),
    ));

    let server = TestServer::new(routes::routes(crawl_service, video_service))
        .expect("test server should start");

    TestApp { server, db, engine }
}
