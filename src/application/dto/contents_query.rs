// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::scraped_content_repository::ContentQuery;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 已保存内容查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ContentsQueryDto {
    /// 话题标签，可带前导 `#`
    pub hashtag: Option<String>,
    /// 维基主机名等其他来源，`hashtag` 存在时忽略
    pub source: Option<String>,
    pub min_views: Option<u64>,
    #[validate(range(min = 1, max = 400))]
    pub limit: Option<u64>,
}

impl From<ContentsQueryDto> for ContentQuery {
    fn from(dto: ContentsQueryDto) -> Self {
        let source = match dto.hashtag {
            Some(tag) => Some(format!("#{}", tag.trim().trim_start_matches('#'))),
            None => dto.source,
        };
        ContentQuery {
            source,
            min_views: dto.min_views,
            limit: dto.limit.unwrap_or(super::DEFAULT_CRAWL_LIMIT as u64),
        }
    }
}
