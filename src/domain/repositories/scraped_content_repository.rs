// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::scraped_content::ScrapedContent;
use async_trait::async_trait;

/// 已保存内容的查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    /// 来源标签（如 `#shorts` 或维基主机名），为空时不过滤
    pub source: Option<String>,
    /// 最低播放量
    pub min_views: Option<u64>,
    /// 返回条数上限
    pub limit: u64,
}

/// 抓取内容仓库特质
#[async_trait]
pub trait ScrapedContentRepository: Send + Sync {
    /// 保存一次爬取的全部内容
    ///
    /// 同一来源下相同 `video_id` 的条目会被更新而不是重复插入。
    /// 返回写入的条目数。
    async fn save_all(
        &self,
        source: &str,
        contents: &[ScrapedContent],
    ) -> Result<u64, RepositoryError>;

    /// 按条件查询，播放量从高到低排列
    async fn query(&self, filter: &ContentQuery) -> Result<Vec<ScrapedContent>, RepositoryError>;
}
