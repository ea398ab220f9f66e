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

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 无法启动或连接浏览器
    #[error("Failed to launch browser: {0}")]
    Launch(String),
    /// 导航失败
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// 元素不存在
    #[error("Element not found: {0}")]
    NotFound(String),
    /// 超时
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 可发送给元素的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    PageDown,
}

impl Key {
    /// CDP 按键定义名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::PageDown => "PageDown",
        }
    }
}

/// 会话配置
///
/// 在会话打开时一次性附加到浏览器句柄上，之后只读。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// 目标站点主机名
    pub host: String,
    /// 每个出站请求附带的请求头
    pub headers: BTreeMap<String, String>,
    /// 页面加载超时
    pub page_load_timeout: Duration,
    /// 脚本与元素操作超时
    pub script_timeout: Duration,
}

impl SessionConfig {
    /// 为目标站点创建配置，`Host` 与 `Referer` 与站点保持一致
    pub fn for_host(host: impl Into<String>) -> Self {
        let host = host.into();
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), host.clone());
        headers.insert("Referer".to_string(), format!("https://{}/", host));

        Self {
            host,
            headers,
            page_load_timeout: Duration::from_secs(300),
            script_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeouts(mut self, page_load: Duration, script: Duration) -> Self {
        self.page_load_timeout = page_load;
        self.script_timeout = script;
        self
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("User-Agent").map(String::as_str)
    }
}

/// 页面元素句柄
pub type NodeHandle = Box<dyn ElementHandle>;

/// 浏览器引擎特质
///
/// 每次调用 `open` 都返回一个独立的页面会话，会话之间不共享状态
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// 启动浏览器并打开一个附带会话配置的空白页面
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn BrowserPage>, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 浏览器页面特质
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// 导航到指定地址并等待加载
    async fn navigate(&self, url: &str) -> Result<(), EngineError>;

    /// 查找第一个匹配的元素
    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError>;

    /// 查找所有匹配的元素，按文档顺序返回
    async fn find_all(&self, selector: &str) -> Result<Vec<NodeHandle>, EngineError>;

    /// 截取当前页面的 PNG 图像
    async fn screenshot(&self) -> Result<Vec<u8>, EngineError>;

    /// 释放浏览器资源
    async fn close(&self) -> Result<(), EngineError>;
}

/// 元素句柄特质
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// 在元素子树中查找第一个匹配的元素
    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError>;

    /// 读取属性值
    async fn attribute(&self, name: &str) -> Result<Option<String>, EngineError>;

    /// 读取渲染后的文本
    async fn text(&self) -> Result<String, EngineError>;

    /// 将元素滚动到可视区域
    async fn scroll_into_view(&self) -> Result<(), EngineError>;

    /// 向元素发送按键
    async fn send_key(&self, key: Key) -> Result<(), EngineError>;
}
