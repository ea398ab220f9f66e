// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义应用程序层的数据传输对象
/// 用于在API请求和领域模型之间传输数据
pub mod contents_query;
pub mod crawl_request;
pub mod crawl_response;
pub mod video_request;

/// 未指定时收集的条目数
pub const DEFAULT_CRAWL_LIMIT: usize = 10;

pub(crate) fn default_crawl_limit() -> usize {
    DEFAULT_CRAWL_LIMIT
}
