// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 爬取服务（crawl_service）：打开会话、执行站点策略并保存结果
/// - 元数据获取（metadata_fetcher）：视频元数据来源的抽象
/// - 视频服务（video_service）：先查缓存，未命中时获取并保存
pub mod crawl_service;
pub mod metadata_fetcher;
pub mod video_service;

use crate::domain::repositories::RepositoryError;
use crate::engines::traits::EngineError;
use thiserror::Error;

/// 服务错误类型
///
/// 爬取过程中的页面错误不会出现在这里，它们体现在 `CrawlResult` 的状态中。
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 请求参数不合法
    #[error("Validation error: {0}")]
    Validation(String),
    /// 目标不存在
    #[error("Not found: {0}")]
    NotFound(String),
    /// 浏览器会话无法建立
    #[error("Crawler session unavailable: {0}")]
    SessionUnavailable(#[source] EngineError),
    /// 上游元数据服务失败
    #[error("Upstream service failed: {0}")]
    Upstream(String),
    /// 存储错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
