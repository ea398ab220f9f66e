// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 视频元数据实体
///
/// 由元数据获取器生成，缓存在存储中。除 `video_id` 外的字段都可能缺失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// YouTube 视频 ID
    pub video_id: String,
    /// 标题
    pub title: Option<String>,
    /// 描述
    pub description: Option<String>,
    /// 时长（秒）
    pub length: Option<i64>,
    /// 播放量
    pub views: Option<i64>,
    /// 平均评分
    pub rating: Option<f64>,
    /// 发布时间
    pub publish_date: Option<DateTime<Utc>>,
    /// 缩略图地址
    pub thumbnail_url: Option<String>,
}

impl VideoMetadata {
    /// 只有 ID 的空元数据
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: None,
            description: None,
            length: None,
            views: None,
            rating: None,
            publish_date: None,
            thumbnail_url: None,
        }
    }

    /// 缩略图缺失时使用 i.ytimg.com 的固定地址
    pub fn with_fallback_thumbnail(mut self) -> Self {
        if self.thumbnail_url.as_deref().map_or(true, str::is_empty) {
            self.thumbnail_url = Some(fallback_thumbnail_url(&self.video_id));
        }
        self
    }
}

/// 根据视频 ID 合成缩略图地址
pub fn fallback_thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hq2.jpg", video_id)
}
