// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::crawl_service::CrawlService;
use crate::domain::services::video_service::VideoService;
use crate::presentation::handlers::{crawl_handler, video_handler};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `crawl_service` - 爬取服务
/// * `video_service` - 视频服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(crawl_service: Arc<CrawlService>, video_service: Arc<VideoService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/version", get(version));

    let api_routes = Router::new()
        .route("/api/v1/crawl/hashtag", post(crawl_handler::crawl_hashtag))
        .route("/api/v1/crawl/wiki", post(crawl_handler::crawl_wiki))
        .route("/api/v1/contents", get(crawl_handler::list_contents))
        .route("/api/v1/videos", post(video_handler::create_video))
        .layer(Extension(crawl_service))
        .layer(Extension(video_service));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
