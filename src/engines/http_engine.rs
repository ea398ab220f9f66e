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

use crate::engines::traits::{
    BrowserEngine, BrowserPage, ElementHandle, EngineError, Key, NodeHandle, SessionConfig,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use scraper::{ElementRef, Html, Selector};
use std::sync::RwLock;
use tracing::debug;

/// HTTP 快照引擎
///
/// 基于 reqwest 获取页面源码并用 scraper 解析，不执行 JavaScript。
/// 适用于服务端渲染的页面（如维基），以及离线回放保存的 HTML。
pub struct HttpEngine;

#[async_trait]
impl BrowserEngine for HttpEngine {
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn BrowserPage>, EngineError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &config.headers {
            if let (Ok(k), Ok(v)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.insert(k, v);
            }
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.page_load_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        Ok(Box::new(HttpPage {
            client: Some(client),
            document: RwLock::new(None),
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// HTTP 快照页面
pub struct HttpPage {
    client: Option<reqwest::Client>,
    document: RwLock<Option<String>>,
}

impl HttpPage {
    /// 用已有的 HTML 构造页面，导航为空操作
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            client: None,
            document: RwLock::new(Some(html.into())),
        }
    }

    fn select_from_document(&self, selector: &str) -> Result<Vec<String>, EngineError> {
        let selector = parse_selector(selector)?;
        let guard = self
            .document
            .read()
            .map_err(|_| EngineError::Other("document lock poisoned".to_string()))?;
        let html = guard
            .as_deref()
            .ok_or_else(|| EngineError::Other("no document loaded".to_string()))?;

        let document = Html::parse_document(html);
        Ok(document.select(&selector).map(|e| e.html()).collect())
    }
}

#[async_trait]
impl BrowserPage for HttpPage {
    async fn navigate(&self, url: &str) -> Result<(), EngineError> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let navigation_error = |reason: String| EngineError::Navigation {
            url: url.to_string(),
            reason,
        };
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| navigation_error(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;
        debug!(url, bytes = body.len(), "Fetched page snapshot");

        let mut guard = self
            .document
            .write()
            .map_err(|_| EngineError::Other("document lock poisoned".to_string()))?;
        *guard = Some(body);
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError> {
        let html = self
            .select_from_document(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::NotFound(selector.to_string()))?;
        Ok(Box::new(HtmlNode { html }))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<NodeHandle>, EngineError> {
        Ok(self
            .select_from_document(selector)?
            .into_iter()
            .map(|html| Box::new(HtmlNode { html }) as NodeHandle)
            .collect())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, EngineError> {
        Err(EngineError::Other(
            "screenshots need a rendering engine".to_string(),
        ))
    }

    async fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// 以外层 HTML 表示的元素
pub struct HtmlNode {
    html: String,
}

impl HtmlNode {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// 在片段中查找后代元素，不包括元素自身
    fn select_descendant(&self, selector: &str) -> Result<Option<String>, EngineError> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let own_id = own_element(&fragment).map(|e| e.id());

        Ok(fragment
            .select(&selector)
            .find(|e| Some(e.id()) != own_id)
            .map(|e| e.html()))
    }

    fn read<T>(&self, f: impl FnOnce(ElementRef<'_>) -> T) -> Result<T, EngineError> {
        let fragment = Html::parse_fragment(&self.html);
        own_element(&fragment)
            .map(f)
            .ok_or_else(|| EngineError::Other("empty element".to_string()))
    }
}

#[async_trait]
impl ElementHandle for HtmlNode {
    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError> {
        let html = self
            .select_descendant(selector)?
            .ok_or_else(|| EngineError::NotFound(selector.to_string()))?;
        Ok(Box::new(HtmlNode { html }))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, EngineError> {
        self.read(|e| e.value().attr(name).map(str::to_string))
    }

    async fn text(&self) -> Result<String, EngineError> {
        self.read(|e| {
            e.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    async fn scroll_into_view(&self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn send_key(&self, _key: Key) -> Result<(), EngineError> {
        Ok(())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, EngineError> {
    Selector::parse(selector)
        .map_err(|e| EngineError::Other(format!("invalid selector {}: {}", selector, e)))
}

fn own_element(fragment: &Html) -> Option<ElementRef<'_>> {
    fragment
        .root_element()
        .children()
        .find_map(ElementRef::wrap)
}
