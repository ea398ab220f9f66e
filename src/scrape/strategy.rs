// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_content::{CrawlResult, ScrapedContent};
use crate::engines::traits::{BrowserPage, EngineError};
use crate::scrape::controller::CrawlLoop;
use async_trait::async_trait;
use thiserror::Error;

/// YouTube loads 36 grid items per scroll
pub const DEFAULT_BATCH_SIZE: usize = 36;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// 浏览器操作失败（包括元素不存在）
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// 元素存在但缺少必需的属性
    #[error("Attribute {attribute} missing on {selector}")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },
    /// 无法从地址中得到标识符
    #[error("Invalid content URL: {0}")]
    InvalidUrl(String),
}

/// 抓取策略特质
///
/// 每个站点一个实现：
/// - `fetch_batch` 是唯一接触分页状态的部分（滚动加载等）
/// - `extract` 把单个节点整理成 [`ScrapedContent`]
/// - `admits` 是纯粹的业务过滤条件
///
/// 循环本身由 [`CrawlLoop`] 驱动。
#[async_trait]
pub trait ScrapeStrategy: Send + Sync {
    /// 原始节点类型
    type Node: Send + Sync;

    /// 策略名称，用于日志和指标
    fn name(&self) -> &'static str;

    /// 站点原生的分页大小
    fn batch_size(&self) -> usize {
        DEFAULT_BATCH_SIZE
    }

    /// 从 `offset` 开始获取下一批原始节点
    ///
    /// 返回的数量少于 `batch_size` 表示页面内容已经耗尽。
    async fn fetch_batch(
        &self,
        page: &dyn BrowserPage,
        offset: usize,
    ) -> Result<Vec<Self::Node>, ScrapeError>;

    /// 从单个节点提取内容
    async fn extract(&self, node: &Self::Node) -> Result<ScrapedContent, ScrapeError>;

    /// 内容是否被收录
    fn admits(&self, content: &ScrapedContent) -> bool;

    /// 执行有界的爬取循环，总是返回结果
    async fn run(&self, page: &dyn BrowserPage, limit: usize, crawl_loop: &CrawlLoop) -> CrawlResult {
        crawl_loop.drive(self, page, limit).await
    }
}
