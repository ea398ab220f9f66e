// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_content::{CrawlResult, CrawlStatus, ScrapedContent};
use serde::{Deserialize, Serialize};

/// 爬取响应
///
/// `length` 总是等于 `contents` 的长度
#[derive(Debug, Serialize, Deserialize)]
pub struct CrawlResponseDto {
    pub length: usize,
    pub status: CrawlStatus,
    pub contents: Vec<ScrapedContent>,
}

impl From<CrawlResult> for CrawlResponseDto {
    fn from(result: CrawlResult) -> Self {
        let status = result.status();
        let contents = result.into_contents();
        Self {
            length: contents.len(),
            status,
            contents,
        }
    }
}
