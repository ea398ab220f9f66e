// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::YouTubeSettings;
use crate::domain::models::video::VideoMetadata;
use crate::domain::services::metadata_fetcher::{FetchError, VideoMetadataFetcher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("ISO 8601 duration pattern is valid")
});

/// YouTube 元数据客户端
///
/// 配置了 API 密钥时使用 Data API v3，可以拿到描述、时长、播放量和发布时间；
/// 否则退回到无需鉴权的 oEmbed 接口，只有标题和缩略图。
pub struct YouTubeDataClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base_url: String,
    oembed_url: String,
}

impl YouTubeDataClient {
    pub fn new(settings: &YouTubeSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FetchError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|key| !key.is_empty()),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            oembed_url: settings.oembed_url.clone(),
        })
    }

    async fn fetch_from_data_api(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> Result<VideoMetadata, FetchError> {
        let url = format!("{}/videos", self.api_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails,statistics"),
                ("id", video_id),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(upstream)?;

        if !response.status().is_success() {
            return Err(FetchError::Upstream(format!(
                "Data API returned HTTP {}",
                response.status()
            )));
        }

        let body: VideoListResponse = response.json().await.map_err(upstream)?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(video_id.to_string()))?;

        let mut video = VideoMetadata::new(video_id);
        if let Some(snippet) = item.snippet {
            video.title = snippet.title;
            video.description = snippet.description;
            video.publish_date = snippet
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));
            video.thumbnail_url = snippet.thumbnails.and_then(Thumbnails::best);
        }
        video.length = item
            .content_details
            .and_then(|details| details.duration)
            .and_then(|d| parse_iso_duration(&d));
        video.views = item
            .statistics
            .and_then(|stats| stats.view_count)
            .and_then(|v| v.parse().ok());

        Ok(video)
    }

    async fn fetch_from_oembed(&self, video_id: &str) -> Result<VideoMetadata, FetchError> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        let response = self
            .client
            .get(&self.oembed_url)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(upstream)?;

        match response.status() {
            s if s.is_success() => {}
            // oEmbed answers 401 for private videos and 400/404 for unknown ids
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                return Err(FetchError::NotFound(video_id.to_string()));
            }
            s => {
                return Err(FetchError::Upstream(format!("oEmbed returned HTTP {}", s)));
            }
        }

        let body: OEmbedResponse = response.json().await.map_err(upstream)?;
        let mut video = VideoMetadata::new(video_id);
        video.title = body.title;
        video.thumbnail_url = body.thumbnail_url;
        Ok(video)
    }
}

#[async_trait]
impl VideoMetadataFetcher for YouTubeDataClient {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, FetchError> {
        let video = match &self.api_key {
            Some(key) => self.fetch_from_data_api(video_id, key).await?,
            None => self.fetch_from_oembed(video_id).await?,
        };
        debug!(video_id, title = ?video.title, "Fetched video metadata");
        Ok(video.with_fallback_thumbnail())
    }
}

fn upstream(e: reqwest::Error) -> FetchError {
    FetchError::Upstream(e.to_string())
}

/// 将 ISO 8601 时长（如 `PT1H2M3S`）转换为秒
///
/// 格式不符或数值溢出时返回 `None`
pub fn parse_iso_duration(text: &str) -> Option<i64> {
    let caps = ISO_DURATION.captures(text)?;
    [(1, 86_400i64), (2, 3_600), (3, 60), (4, 1)]
        .into_iter()
        .try_fold(0i64, |total, (group, unit)| {
            let value: i64 = match caps.get(group) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            total.checked_add(value.checked_mul(unit)?)
        })
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    maxres: Option<Thumbnail>,
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

impl Thumbnails {
    fn best(self) -> Option<String> {
        self.maxres
            .or(self.high)
            .or(self.medium)
            .or(self.default)
            .map(|t| t.url)
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    thumbnail_url: Option<String>,
}
