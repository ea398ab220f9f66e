// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::default_crawl_limit;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 话题标签爬取请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct HashtagCrawlRequestDto {
    /// 话题标签，可带前导 `#`
    #[validate(length(min = 1, max = 100))]
    pub hashtag: String,
    /// 需要收集的通过过滤的条目数
    #[serde(default = "default_crawl_limit")]
    #[validate(range(max = 400))]
    pub limit: usize,
}

/// 维基页面爬取请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct WikiCrawlRequestDto {
    #[validate(url)]
    pub url: String,
    #[serde(default = "default_crawl_limit")]
    #[validate(range(max = 400))]
    pub limit: usize,
}
