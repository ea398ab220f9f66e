// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlSettings;
use crate::domain::models::scraped_content::ScrapedContent;
use crate::domain::models::video::fallback_thumbnail_url;
use crate::engines::traits::{BrowserPage, EngineError, Key, NodeHandle};
use crate::scrape::strategy::{ScrapeError, ScrapeStrategy, DEFAULT_BATCH_SIZE};
use crate::scrape::view_count::parse_view_count;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub const YOUTUBE_ORIGIN: &str = "https://www.youtube.com";
pub const YOUTUBE_HOST: &str = "www.youtube.com";

/// One grid cell of the hashtag feed
pub const HASHTAG_ITEM_SELECTOR: &str = "#contents > ytd-rich-item-renderer";

const THUMBNAIL_LINK_SELECTOR: &str = "#thumbnail #thumbnail";
const THUMBNAIL_IMAGE_SELECTOR: &str = "yt-image > img";
const TITLE_SELECTOR: &str = "#details #meta #video-title";
const CHANNEL_SELECTOR: &str = "#channel-name #text > a";
const VIEWS_SELECTOR: &str = "#metadata-line > span:nth-child(3)";
const DATE_SELECTOR: &str = "#metadata-line > span:nth-child(4)";

pub const DEFAULT_MIN_VIEWS: u64 = 1_000_000;

/// YouTube 话题标签搜索策略
///
/// 通过向页面发送 PageDown 触发无限滚动加载，每批最多 36 个网格条目，
/// 只收录播放量不低于 `min_views` 的视频。
#[derive(Debug, Clone)]
pub struct HashtagSearch {
    min_views: u64,
    scroll_pause: Duration,
    max_idle_scrolls: u32,
    batch_size: usize,
}

impl Default for HashtagSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VIEWS)
    }
}

impl HashtagSearch {
    pub fn new(min_views: u64) -> Self {
        Self {
            min_views,
            scroll_pause: Duration::from_millis(500),
            max_idle_scrolls: 10,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn from_settings(settings: &CrawlSettings) -> Self {
        Self::new(settings.min_views)
            .with_scroll_pause(Duration::from_millis(settings.scroll_pause_ms))
            .with_max_idle_scrolls(settings.max_idle_scrolls)
    }

    pub fn with_scroll_pause(mut self, pause: Duration) -> Self {
        self.scroll_pause = pause;
        self
    }

    pub fn with_max_idle_scrolls(mut self, max_idle_scrolls: u32) -> Self {
        self.max_idle_scrolls = max_idle_scrolls;
        self
    }

    /// 话题标签页地址，允许带或不带前导 `#`
    pub fn url_for(hashtag: &str) -> String {
        let tag = hashtag.trim().trim_start_matches('#');
        format!("{}/hashtag/{}", YOUTUBE_ORIGIN, urlencoding::encode(tag))
    }

    /// Presses PageDown on the document root and nudges the last item into view.
    async fn reveal_more(
        &self,
        page: &dyn BrowserPage,
        last: Option<&NodeHandle>,
    ) -> Result<(), EngineError> {
        page.find("html").await?.send_key(Key::PageDown).await?;
        if let Some(node) = last {
            node.scroll_into_view().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ScrapeStrategy for HashtagSearch {
    type Node = NodeHandle;

    fn name(&self) -> &'static str {
        "hashtag"
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    async fn fetch_batch(
        &self,
        page: &dyn BrowserPage,
        offset: usize,
    ) -> Result<Vec<NodeHandle>, ScrapeError> {
        let mut seen = 0usize;
        let mut idle = 0u32;

        loop {
            let nodes = page.find_all(HASHTAG_ITEM_SELECTOR).await?;
            let available = nodes.len().saturating_sub(offset);

            if available >= self.batch_size || idle >= self.max_idle_scrolls {
                debug!(offset, available, idle, "Hashtag batch ready");
                return Ok(nodes
                    .into_iter()
                    .skip(offset)
                    .take(self.batch_size)
                    .collect());
            }

            if nodes.len() > seen {
                idle = 0;
            } else {
                idle += 1;
            }
            seen = nodes.len();
            trace!(offset, loaded = seen, idle, "Scrolling for more items");

            self.reveal_more(page, nodes.last()).await?;
            tokio::time::sleep(self.scroll_pause).await;
        }
    }

    async fn extract(&self, node: &NodeHandle) -> Result<ScrapedContent, ScrapeError> {
        // Thumbnails are lazy-loaded until the item is on screen
        node.scroll_into_view().await?;

        let href = node
            .find(THUMBNAIL_LINK_SELECTOR)
            .await?
            .attribute("href")
            .await?
            .filter(|href| !href.is_empty())
            .ok_or(ScrapeError::MissingAttribute {
                selector: THUMBNAIL_LINK_SELECTOR,
                attribute: "href",
            })?;
        let video_url = absolutize(&href)?;
        let video_id =
            video_id_from_url(&video_url).ok_or_else(|| ScrapeError::InvalidUrl(video_url.clone()))?;

        let thumbnail_url = match node.find(THUMBNAIL_IMAGE_SELECTOR).await {
            Ok(img) => img.attribute("src").await?.filter(|src| !src.is_empty()),
            Err(EngineError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        }
        .unwrap_or_else(|| fallback_thumbnail_url(&video_id));

        let title = node.find(TITLE_SELECTOR).await?.text().await?;
        let channel = node.find(CHANNEL_SELECTOR).await?.text().await?;
        let views = node.find(VIEWS_SELECTOR).await?.text().await?;
        let date = node.find(DATE_SELECTOR).await?.text().await?;

        Ok(ScrapedContent {
            video_id,
            title: title.trim().to_string(),
            channel: channel.trim().to_string(),
            video_url,
            thumbnail_url,
            view_count: parse_view_count(&views),
            date: date.trim().to_string(),
        })
    }

    fn admits(&self, content: &ScrapedContent) -> bool {
        content.view_count >= self.min_views
    }
}

fn absolutize(href: &str) -> Result<String, ScrapeError> {
    Url::parse(YOUTUBE_ORIGIN)
        .and_then(|base| base.join(href))
        .map(String::from)
        .map_err(|_| ScrapeError::InvalidUrl(href.to_string()))
}

/// 从视频地址中取出标识符
///
/// `/watch?v=ID` 取查询参数 `v`，其他形式（`/shorts/ID` 等）取最后一个路径段。
pub fn video_id_from_url(video_url: &str) -> Option<String> {
    let url = Url::parse(video_url).ok()?;

    if url.path() == "/watch" {
        return url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty());
    }

    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
