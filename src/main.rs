// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tubecrawl::config::settings::Settings;
use tubecrawl::domain::services::crawl_service::CrawlService;
use tubecrawl::domain::services::video_service::VideoService;
use tubecrawl::engines;
use tubecrawl::infrastructure::database::connection;
use tubecrawl::infrastructure::metrics;
use tubecrawl::infrastructure::repositories::scraped_content_repo_impl::ScrapedContentRepositoryImpl;
use tubecrawl::infrastructure::repositories::video_repo_impl::VideoRepositoryImpl;
use tubecrawl::infrastructure::youtube_client::YouTubeDataClient;
use tubecrawl::presentation::routes;
use tubecrawl::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.log.format);
    info!("Starting tubecrawl v{}", env!("CARGO_PKG_VERSION"));
    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database ready");

    // 4. Initialize components
    let engine = engines::from_settings(&settings.browser)?;
    info!(engine = engine.name(), "Browser engine configured");

    let content_repo = Arc::new(ScrapedContentRepositoryImpl::new(db.clone()));
    let video_repo = Arc::new(VideoRepositoryImpl::new(db.clone()));
    let fetcher = Arc::new(YouTubeDataClient::new(&settings.youtube)?);

    let crawl_service = Arc::new(CrawlService::new(
        engine,
        content_repo,
        settings.browser.clone(),
        settings.crawl.clone(),
    ));
    let video_service = Arc::new(VideoService::new(video_repo, fetcher));

    // 5. Start server
    let app = routes::routes(crawl_service, video_service);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
