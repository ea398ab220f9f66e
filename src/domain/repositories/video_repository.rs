// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::video::VideoMetadata;
use async_trait::async_trait;

/// 视频元数据仓库特质
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// 保存视频元数据，已存在时覆盖
    async fn save(&self, video: &VideoMetadata) -> Result<VideoMetadata, RepositoryError>;

    /// 根据视频 ID 查找
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(VideoMetadata))` - 已缓存
    /// * `Ok(None)` - 未缓存
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_by_id(&self, video_id: &str) -> Result<Option<VideoMetadata>, RepositoryError>;
}
