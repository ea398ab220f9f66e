// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{
    BrowserEngine, BrowserPage, ElementHandle, EngineError, Key, NodeHandle, SessionConfig,
};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{
    Headers, SetExtraHttpHeadersParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

async fn within<T, F>(limit: Duration, fut: F) -> Result<T, EngineError>
where
    F: Future<Output = Result<T, EngineError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| EngineError::Timeout(limit))?
}

/// 为每个启动的浏览器创建独立的用户数据目录
fn fresh_profile() -> Result<TempDir, EngineError> {
    tempfile::Builder::new()
        .prefix("tubecrawl-chrome-")
        .tempdir()
        .map_err(|e| EngineError::Launch(format!("profile directory: {}", e)))
}

/// 已启动或已连接的浏览器
struct Launched {
    browser: Browser,
    handler: chromiumoxide::Handler,
    /// 仅本地启动时存在，远程实例不归本会话所有
    profile: Option<TempDir>,
}

/// Chromium 引擎
///
/// 基于 chromiumoxide 通过 CDP 驱动 Chrome。每个会话启动独立的浏览器进程，
/// 配置了远程调试地址时改为连接已有实例并只打开新页面。
pub struct ChromiumEngine {
    remote_debugging_url: Option<String>,
    executable: Option<PathBuf>,
    headless: bool,
}

impl ChromiumEngine {
    pub fn new(settings: &BrowserSettings) -> Self {
        Self {
            remote_debugging_url: settings.remote_debugging_url.clone(),
            executable: settings.executable.as_ref().map(PathBuf::from),
            headless: settings.headless,
        }
    }

    async fn launch(&self, config: &SessionConfig) -> Result<Launched, EngineError> {
        if let Some(url) = &self.remote_debugging_url {
            info!("Connecting to remote Chrome instance at: {}", url);
            let (browser, handler) = Browser::connect(url)
                .await
                .map_err(|e| EngineError::Launch(format!("remote Chrome {}: {}", url, e)))?;
            return Ok(Launched {
                browser,
                handler,
                profile: None,
            });
        }

        // Chrome hands a launch on an in-use profile over to the running process
        let profile = fresh_profile()?;
        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile.path())
            .no_sandbox()
            .request_timeout(config.page_load_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(EngineError::Launch)?;
        let (browser, handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;
        Ok(Launched {
            browser,
            handler,
            profile: Some(profile),
        })
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn BrowserPage>, EngineError> {
        let Launched {
            browser,
            mut handler,
            profile,
        } = self.launch(config).await?;
        let owned = profile.is_some();

        // Spawn a handler to process browser events
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(EngineError::Launch(format!("new page: {}", e)));
            }
        };

        if let Some(user_agent) = config.user_agent() {
            if let Err(e) = page
                .set_user_agent(SetUserAgentOverrideParams::new(user_agent))
                .await
            {
                warn!("Failed to set user agent: {}", e);
            }
        }

        let extra: serde_json::Map<String, serde_json::Value> = config
            .headers
            .iter()
            .filter(|(name, _)| name.as_str() != "User-Agent")
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect();
        if let Err(e) = page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(
                serde_json::Value::Object(extra),
            )))
            .await
        {
            // Chrome rejects some forbidden header names; the session is still usable
            warn!(host = %config.host, "Failed to attach request headers: {}", e);
        }

        debug!(host = %config.host, owned, "Chromium session opened");

        Ok(Box::new(ChromiumPage {
            browser: Mutex::new(Some(browser)),
            profile: Mutex::new(profile),
            page,
            handler_task,
            page_load_timeout: config.page_load_timeout,
            script_timeout: config.script_timeout,
        }))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// Chromium 页面会话
pub struct ChromiumPage {
    browser: Mutex<Option<Browser>>,
    /// 浏览器退出后才删除
    profile: Mutex<Option<TempDir>>,
    page: Page,
    handler_task: JoinHandle<()>,
    page_load_timeout: Duration,
    script_timeout: Duration,
}

impl ChromiumPage {
    fn wrap(&self, element: Element) -> NodeHandle {
        Box::new(ChromiumElement {
            element,
            script_timeout: self.script_timeout,
        })
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn navigate(&self, url: &str) -> Result<(), EngineError> {
        within(self.page_load_timeout, async {
            self.page
                .goto(url)
                .await
                .map(|_| ())
                .map_err(|e| EngineError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        })
        .await
    }

    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError> {
        let element = within(self.script_timeout, async {
            self.page
                .find_element(selector)
                .await
                .map_err(|e| EngineError::NotFound(format!("{} ({})", selector, e)))
        })
        .await?;
        Ok(self.wrap(element))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<NodeHandle>, EngineError> {
        let elements = within(self.script_timeout, async {
            self.page
                .find_elements(selector)
                .await
                .map_err(|e| EngineError::Other(format!("find_all {}: {}", selector, e)))
        })
        .await?;
        Ok(elements.into_iter().map(|e| self.wrap(e)).collect())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, EngineError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        within(self.script_timeout, async {
            self.page
                .screenshot(params)
                .await
                .map_err(|e| EngineError::Other(format!("Page screenshot failed: {}", e)))
        })
        .await
    }

    async fn close(&self) -> Result<(), EngineError> {
        if let Err(e) = self.page.clone().close().await {
            debug!("Page close failed: {}", e);
        }

        let profile = self.profile.lock().await.take();
        if let Some(mut browser) = self.browser.lock().await.take() {
            // A remote instance is shared; only our page is ours to close
            if profile.is_some() {
                browser
                    .close()
                    .await
                    .map_err(|e| EngineError::Other(format!("Browser close failed: {}", e)))?;
                if let Err(e) = browser.wait().await {
                    warn!("Waiting for browser exit failed: {}", e);
                }
            }
        }
        if let Some(dir) = profile {
            if let Err(e) = dir.close() {
                debug!("Profile directory cleanup failed: {}", e);
            }
        }

        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for ChromiumPage {
    fn drop(&mut self) {
        // chromiumoxide kills a launched child process when `Browser` drops
        self.handler_task.abort();
    }
}

/// Chromium 元素句柄
pub struct ChromiumElement {
    element: Element,
    script_timeout: Duration,
}

#[async_trait]
impl ElementHandle for ChromiumElement {
    async fn find(&self, selector: &str) -> Result<NodeHandle, EngineError> {
        let element = within(self.script_timeout, async {
            self.element
                .find_element(selector)
                .await
                .map_err(|e| EngineError::NotFound(format!("{} ({})", selector, e)))
        })
        .await?;
        Ok(Box::new(ChromiumElement {
            element,
            script_timeout: self.script_timeout,
        }))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, EngineError> {
        within(self.script_timeout, async {
            self.element
                .attribute(name)
                .await
                .map_err(|e| EngineError::Other(format!("attribute {}: {}", name, e)))
        })
        .await
    }

    async fn text(&self) -> Result<String, EngineError> {
        within(self.script_timeout, async {
            self.element
                .inner_text()
                .await
                .map(|text| text.unwrap_or_default())
                .map_err(|e| EngineError::Other(format!("inner text: {}", e)))
        })
        .await
    }

    async fn scroll_into_view(&self) -> Result<(), EngineError> {
        within(self.script_timeout, async {
            self.element
                .scroll_into_view()
                .await
                .map(|_| ())
                .map_err(|e| EngineError::Other(format!("scroll into view: {}", e)))
        })
        .await
    }

    async fn send_key(&self, key: Key) -> Result<(), EngineError> {
        within(self.script_timeout, async {
            // press_key dispatches to whatever currently has focus
            self.element
                .focus()
                .await
                .map_err(|e| EngineError::Other(format!("focus: {}", e)))?;
            self.element
                .press_key(key.as_str())
                .await
                .map(|_| ())
                .map_err(|e| EngineError::Other(format!("press {}: {}", key.as_str(), e)))
        })
        .await
    }
}
