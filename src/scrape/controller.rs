// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_content::{CrawlResult, CrawlStatus, ScrapedContent};
use crate::engines::traits::BrowserPage;
use crate::infrastructure::metrics;
use crate::scrape::strategy::{ScrapeError, ScrapeStrategy};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Below YouTube's ~450 item maximum per feed
pub const DEFAULT_HARD_CEILING: usize = 400;

/// 爬取循环控制器
///
/// 按偏移递增的顺序逐批获取节点、提取并过滤，直到以下任一条件成立：
/// - 收集数量达到 `limit`（Complete）
/// - 已获取的原始节点数达到上限，或页面返回的批次不足（PartialDueToLimit）
/// - 获取或提取出错（PartialDueToFault）
///
/// 三种情况都返回已收集的结果，错误不会传播给调用者。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLoop {
    hard_ceiling: usize,
}

impl Default for CrawlLoop {
    fn default() -> Self {
        Self::new(DEFAULT_HARD_CEILING)
    }
}

impl CrawlLoop {
    pub fn new(hard_ceiling: usize) -> Self {
        Self { hard_ceiling }
    }

    /// 驱动策略直到终止
    pub async fn drive<S>(&self, strategy: &S, page: &dyn BrowserPage, limit: usize) -> CrawlResult
    where
        S: ScrapeStrategy + ?Sized,
    {
        let started = Instant::now();
        let mut contents = Vec::new();
        let mut offset = 0usize;
        let mut visited = 0usize;

        let status = loop {
            if contents.len() >= limit {
                break CrawlStatus::Complete;
            }
            if offset >= self.hard_ceiling {
                break CrawlStatus::PartialDueToLimit;
            }

            let batch = match strategy.fetch_batch(page, offset).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(strategy = strategy.name(), offset, error = %e, "Batch fetch failed, returning partial result");
                    break CrawlStatus::PartialDueToFault;
                }
            };
            if batch.is_empty() {
                break CrawlStatus::PartialDueToLimit;
            }

            let fetched = batch.len();
            offset += fetched;
            debug!(strategy = strategy.name(), offset, fetched, "Fetched batch");

            if let Err(e) = collect(strategy, batch, limit, &mut contents, &mut visited).await {
                warn!(strategy = strategy.name(), visited, error = %e, "Extraction failed, returning partial result");
                break CrawlStatus::PartialDueToFault;
            }

            if contents.len() >= limit {
                break CrawlStatus::Complete;
            }
            if fetched < strategy.batch_size() {
                break CrawlStatus::PartialDueToLimit;
            }
        };

        let elapsed = started.elapsed();
        info!(
            strategy = strategy.name(),
            status = status.as_str(),
            collected = contents.len(),
            visited,
            offset,
            elapsed_ms = elapsed.as_millis() as u64,
            "Crawl loop finished"
        );
        metrics::record_crawl(strategy.name(), status, contents.len(), visited, elapsed);

        CrawlResult::new(contents, status, visited)
    }
}

/// Extracts and filters one batch in order, stopping at `limit`.
async fn collect<S>(
    strategy: &S,
    batch: Vec<S::Node>,
    limit: usize,
    contents: &mut Vec<ScrapedContent>,
    visited: &mut usize,
) -> Result<(), ScrapeError>
where
    S: ScrapeStrategy + ?Sized,
{
    for node in &batch {
        *visited += 1;
        let content = strategy.extract(node).await?;
        if strategy.admits(&content) {
            contents.push(content);
            if contents.len() >= limit {
                break;
            }
        }
    }
    Ok(())
}
