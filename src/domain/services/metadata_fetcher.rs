// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::video::VideoMetadata;
use async_trait::async_trait;
use thiserror::Error;

/// 元数据获取错误
#[derive(Error, Debug)]
pub enum FetchError {
    /// 视频不存在或不可见
    #[error("Video {0} not found")]
    NotFound(String),
    /// 上游返回错误或无法解析的响应
    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// 视频元数据获取器特质
#[async_trait]
pub trait VideoMetadataFetcher: Send + Sync {
    /// 获取单个视频的元数据
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, FetchError>;
}
