// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_content::{CrawlResult, CrawlStatus};
use crate::engines::traits::{BrowserEngine, BrowserPage, EngineError, SessionConfig};
use crate::scrape::controller::CrawlLoop;
use crate::scrape::strategy::ScrapeStrategy;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 爬虫会话
///
/// 在生命周期内独占一个浏览器页面。请求头在打开时一次性附加，之后不再修改。
/// 显式调用 [`CrawlerSession::close`] 可以等待资源释放完成；
/// 其他任何退出路径（提前返回、panic 展开）都由 `Drop` 兜底释放。
pub struct CrawlerSession {
    page: Option<Box<dyn BrowserPage>>,
    host: String,
    crawl_loop: CrawlLoop,
    screenshot_dir: Option<PathBuf>,
}

impl CrawlerSession {
    /// 打开会话
    ///
    /// 浏览器无法启动是唯一会返回给调用者的错误
    pub async fn open(
        engine: &dyn BrowserEngine,
        config: &SessionConfig,
    ) -> Result<Self, EngineError> {
        let page = engine.open(config).await.map_err(|e| {
            error!(engine = engine.name(), host = %config.host, error = %e, "Failed to open crawler session");
            e
        })?;
        debug!(engine = engine.name(), host = %config.host, "Crawler session opened");

        Ok(Self {
            page: Some(page),
            host: config.host.clone(),
            crawl_loop: CrawlLoop::default(),
            screenshot_dir: None,
        })
    }

    pub fn with_crawl_loop(mut self, crawl_loop: CrawlLoop) -> Self {
        self.crawl_loop = crawl_loop;
        self
    }

    /// 出错时把页面截图保存到该目录
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// 导航到 `url` 并执行策略
    ///
    /// 导航失败不会返回错误，而是得到一个状态为 `PartialDueToFault` 的空结果。
    pub async fn scrape<S>(&self, url: &str, strategy: &S, limit: usize) -> CrawlResult
    where
        S: ScrapeStrategy,
    {
        let Some(page) = self.page.as_deref() else {
            warn!(url, "Crawler session already released");
            return CrawlResult::faulted();
        };

        info!(url, strategy = strategy.name(), limit, "Starting crawl");

        let result = match page.navigate(url).await {
            Ok(()) => strategy.run(page, limit, &self.crawl_loop).await,
            Err(e) => {
                warn!(url, error = %e, "Navigation failed");
                CrawlResult::faulted()
            }
        };

        if result.status() == CrawlStatus::PartialDueToFault {
            if let Some(dir) = &self.screenshot_dir {
                self.capture_fault(page, dir).await;
            }
        }

        result
    }

    async fn capture_fault(&self, page: &dyn BrowserPage, dir: &Path) {
        let bytes = match page.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to capture fault screenshot");
                return;
            }
        };

        let path = dir.join(format!(
            "{}-{}.png",
            self.host,
            Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
        ));
        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, &bytes).await
        };
        match written.await {
            Ok(()) => info!(path = %path.display(), "Saved fault screenshot"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to save fault screenshot"),
        }
    }

    /// 关闭会话并等待浏览器资源释放
    pub async fn close(mut self) -> Result<(), EngineError> {
        match self.page.take() {
            Some(page) => {
                debug!(host = %self.host, "Closing crawler session");
                page.close().await
            }
            None => Ok(()),
        }
    }
}

impl Drop for CrawlerSession {
    fn drop(&mut self) {
        let Some(page) = self.page.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let host = self.host.clone();
                handle.spawn(async move {
                    if let Err(e) = page.close().await {
                        warn!(host = %host, error = %e, "Failed to release crawler session");
                    }
                });
            }
            Err(_) => warn!(host = %self.host, "No runtime available to release crawler session"),
        }
    }
}
