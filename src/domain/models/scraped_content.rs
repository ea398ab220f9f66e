// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 抓取到的单个内容条目
///
/// 每访问一个页面节点构造一次，构造后不再修改。`date` 保留站点原始的日期文本，不做规范化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedContent {
    /// 站点分配的标识符，在一次爬取内唯一
    pub video_id: String,
    /// 标题
    pub title: String,
    /// 频道名称
    pub channel: String,
    /// 内容地址
    pub video_url: String,
    /// 缩略图地址，缺失时由标识符合成
    pub thumbnail_url: String,
    /// 播放量，解析失败时为 0
    pub view_count: u64,
    /// 站点原始日期文本
    pub date: String,
}

/// 爬取结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// 收集数量达到请求的下限
    Complete,
    /// 页面内容耗尽或达到访问上限
    PartialDueToLimit,
    /// 导航、节点查找或提取出错，返回已收集的部分
    PartialDueToFault,
}

impl CrawlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlStatus::Complete => "complete",
            CrawlStatus::PartialDueToLimit => "partial_due_to_limit",
            CrawlStatus::PartialDueToFault => "partial_due_to_fault",
        }
    }
}

/// 一次爬取调用的聚合结果
///
/// 条目按发现顺序排列。长度始终由 `contents` 推导，不单独存储。
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlResult {
    contents: Vec<ScrapedContent>,
    status: CrawlStatus,
    visited: usize,
}

impl CrawlResult {
    pub fn new(contents: Vec<ScrapedContent>, status: CrawlStatus, visited: usize) -> Self {
        Self {
            contents,
            status,
            visited,
        }
    }

    /// 导航失败等情况下的空结果
    pub fn faulted() -> Self {
        Self::new(Vec::new(), CrawlStatus::PartialDueToFault, 0)
    }

    pub fn length(&self) -> usize {
        self.contents.len()
    }

    pub fn contents(&self) -> &[ScrapedContent] {
        &self.contents
    }

    pub fn into_contents(self) -> Vec<ScrapedContent> {
        self.contents
    }

    pub fn status(&self) -> CrawlStatus {
        self.status
    }

    /// 实际执行过提取的原始节点数
    pub fn visited(&self) -> usize {
        self.visited
    }
}
