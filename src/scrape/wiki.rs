// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraped_content::ScrapedContent;
use crate::engines::traits::{BrowserPage, EngineError, NodeHandle};
use crate::scrape::strategy::{ScrapeError, ScrapeStrategy};
use async_trait::async_trait;
use url::Url;

pub const DEFAULT_WIKI_HOST: &str = "namu.wiki";

/// 维基页面策略
///
/// 收集页面中指向同一维基的文档链接。页面是服务端渲染的，不需要滚动，
/// 所有链接一次性可见，按偏移切片即可。没有业务过滤条件。
#[derive(Debug, Clone)]
pub struct WikiPage {
    host: String,
    link_selector: String,
}

impl Default for WikiPage {
    fn default() -> Self {
        Self::new(DEFAULT_WIKI_HOST)
    }
}

impl WikiPage {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let link_selector = format!(r#"a[href*="{}"], a[href^="/w/"]"#, host);
        Self {
            host,
            link_selector,
        }
    }

    /// 以页面地址的主机名构造策略
    pub fn for_url(page_url: &str) -> Result<Self, ScrapeError> {
        let url = Url::parse(page_url).map_err(|_| ScrapeError::InvalidUrl(page_url.to_string()))?;
        url.host_str()
            .map(Self::new)
            .ok_or_else(|| ScrapeError::InvalidUrl(page_url.to_string()))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn origin(&self) -> String {
        format!("https://{}/", self.host)
    }
}

#[async_trait]
impl ScrapeStrategy for WikiPage {
    type Node = NodeHandle;

    fn name(&self) -> &'static str {
        "wiki"
    }

    async fn fetch_batch(
        &self,
        page: &dyn BrowserPage,
        offset: usize,
    ) -> Result<Vec<NodeHandle>, ScrapeError> {
        Ok(page
            .find_all(&self.link_selector)
            .await?
            .into_iter()
            .skip(offset)
            .take(self.batch_size())
            .collect())
    }

    async fn extract(&self, node: &NodeHandle) -> Result<ScrapedContent, ScrapeError> {
        let href = node
            .attribute("href")
            .await?
            .filter(|href| !href.is_empty())
            .ok_or(ScrapeError::MissingAttribute {
                selector: "a",
                attribute: "href",
            })?;

        let url = Url::parse(&self.origin())
            .and_then(|base| base.join(&href))
            .map_err(|_| ScrapeError::InvalidUrl(href.clone()))?;
        let document_id = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| segment.to_string())
            })
            .ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))?;

        let text = node.text().await?;
        let title = match text.trim() {
            "" => document_id.clone(),
            trimmed => trimmed.to_string(),
        };

        let thumbnail_url = match node.find("img").await {
            Ok(img) => img.attribute("src").await?.filter(|src| !src.is_empty()),
            Err(EngineError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        }
        .unwrap_or_else(|| format!("https://{}/favicon.ico", self.host));

        Ok(ScrapedContent {
            video_id: document_id,
            title,
            channel: self.host.clone(),
            video_url: url.into(),
            thumbnail_url,
            view_count: 0,
            date: String::new(),
        })
    }

    fn admits(&self, _content: &ScrapedContent) -> bool {
        true
    }
}
