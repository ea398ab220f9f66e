// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::metadata_fetcher::{FetchError, VideoMetadataFetcher};
use super::ServiceError;
use crate::domain::models::video::VideoMetadata;
use crate::domain::repositories::video_repository::VideoRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// 视频服务
pub struct VideoService {
    repo: Arc<dyn VideoRepository>,
    fetcher: Arc<dyn VideoMetadataFetcher>,
}

impl VideoService {
    pub fn new(repo: Arc<dyn VideoRepository>, fetcher: Arc<dyn VideoMetadataFetcher>) -> Self {
        Self { repo, fetcher }
    }

    /// 获取视频元数据
    ///
    /// 已缓存的直接返回；否则从上游获取、补全缩略图并保存。
    /// 保存失败不影响返回结果。
    pub async fn get_or_fetch(&self, video_id: &str) -> Result<VideoMetadata, ServiceError> {
        if let Some(video) = self.repo.find_by_id(video_id).await? {
            debug!(video_id, "Video metadata served from store");
            return Ok(video);
        }

        let video = self
            .fetcher
            .fetch(video_id)
            .await
            .map_err(|e| match e {
                FetchError::NotFound(id) => ServiceError::NotFound(format!("video {}", id)),
                FetchError::Upstream(reason) => ServiceError::Upstream(reason),
            })?
            .with_fallback_thumbnail();

        match self.repo.save(&video).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                warn!(video_id, error = %e, "Failed to cache video metadata");
                Ok(video)
            }
        }
    }
}
