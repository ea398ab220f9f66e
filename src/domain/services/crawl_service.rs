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

use super::ServiceError;
use crate::config::settings::{BrowserSettings, CrawlSettings};
use crate::domain::models::scraped_content::{CrawlResult, ScrapedContent};
use crate::domain::repositories::scraped_content_repository::{
    ContentQuery, ScrapedContentRepository,
};
use crate::engines::traits::{BrowserEngine, SessionConfig};
use crate::scrape::controller::CrawlLoop;
use crate::scrape::hashtag::{HashtagSearch, YOUTUBE_HOST};
use crate::scrape::session::CrawlerSession;
use crate::scrape::strategy::ScrapeStrategy;
use crate::scrape::wiki::WikiPage;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 爬取服务
///
/// 每个请求打开一个独立的浏览器会话，执行完毕后立即释放。
/// 爬取结果在返回前写入存储，写入失败只记录日志。
pub struct CrawlService {
    /// 浏览器引擎
    engine: Arc<dyn BrowserEngine>,
    /// 抓取内容仓库
    contents: Arc<dyn ScrapedContentRepository>,
    browser: BrowserSettings,
    crawl: CrawlSettings,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    pub fn new(
        engine: Arc<dyn BrowserEngine>,
        contents: Arc<dyn ScrapedContentRepository>,
        browser: BrowserSettings,
        crawl: CrawlSettings,
    ) -> Self {
        Self {
            engine,
            contents,
            browser,
            crawl,
        }
    }

    /// 会话配置，请求头与目标站点一致
    pub fn session_config(&self, host: &str) -> SessionConfig {
        SessionConfig::for_host(host)
            .with_header("User-Agent", self.browser.user_agent.as_str())
            .with_header("Accept-Language", self.browser.accept_language.as_str())
            .with_timeouts(
                self.browser.page_load_timeout(),
                self.browser.script_timeout(),
            )
    }

    /// 爬取话题标签页
    ///
    /// # 参数
    ///
    /// * `hashtag` - 话题标签，可带前导 `#`
    /// * `limit` - 需要收集的通过过滤的条目数
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlResult)` - 可能少于 `limit`，状态说明原因
    /// * `Err(ServiceError)` - 参数不合法或浏览器无法启动
    pub async fn crawl_hashtag(
        &self,
        hashtag: &str,
        limit: usize,
    ) -> Result<CrawlResult, ServiceError> {
        let tag = hashtag.trim().trim_start_matches('#');
        if tag.is_empty() {
            return Err(ServiceError::Validation(
                "hashtag cannot be empty".to_string(),
            ));
        }

        let strategy = HashtagSearch::from_settings(&self.crawl);
        let url = HashtagSearch::url_for(tag);
        let result = self.crawl_with(YOUTUBE_HOST, &url, &strategy, limit).await?;

        self.persist(&format!("#{}", tag), result.contents()).await;
        Ok(result)
    }

    /// 爬取维基页面中的文档链接
    pub async fn crawl_wiki(&self, url: &str, limit: usize) -> Result<CrawlResult, ServiceError> {
        let strategy =
            WikiPage::for_url(url).map_err(|e| ServiceError::Validation(e.to_string()))?;
        let host = strategy.host().to_string();
        let result = self.crawl_with(&host, url, &strategy, limit).await?;

        self.persist(&host, result.contents()).await;
        Ok(result)
    }

    /// 查询已保存的内容
    pub async fn stored_contents(
        &self,
        filter: &ContentQuery,
    ) -> Result<Vec<ScrapedContent>, ServiceError> {
        Ok(self.contents.query(filter).await?)
    }

    async fn crawl_with<S>(
        &self,
        host: &str,
        url: &str,
        strategy: &S,
        limit: usize,
    ) -> Result<CrawlResult, ServiceError>
    where
        S: ScrapeStrategy,
    {
        let mut session = CrawlerSession::open(self.engine.as_ref(), &self.session_config(host))
            .await
            .map_err(ServiceError::SessionUnavailable)?
            .with_crawl_loop(CrawlLoop::new(self.crawl.hard_ceiling));
        if let Some(dir) = &self.browser.screenshot_dir {
            session = session.with_screenshot_dir(dir);
        }

        let result = session.scrape(url, strategy, limit).await;
        if let Err(e) = session.close().await {
            warn!(host, error = %e, "Failed to close crawler session");
        }

        info!(
            url,
            length = result.length(),
            status = result.status().as_str(),
            "Crawl finished"
        );
        Ok(result)
    }

    async fn persist(&self, source: &str, contents: &[ScrapedContent]) {
        if contents.is_empty() {
            return;
        }
        match self.contents.save_all(source, contents).await {
            Ok(saved) => debug!(source, saved, "Persisted crawled contents"),
            Err(e) => warn!(source, error = %e, "Failed to persist crawled contents"),
        }
    }
}
