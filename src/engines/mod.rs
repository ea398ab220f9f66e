// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 浏览器自动化引擎模块
///
/// 定义爬取核心所需的浏览器能力（导航、元素查找、按键、截图），
/// 并提供基于 chromiumoxide 和基于 HTTP 快照的两种实现
pub mod chromium_engine;
pub mod http_engine;
pub mod traits;

use crate::config::settings::BrowserSettings;
use std::sync::Arc;
use traits::BrowserEngine;

/// 根据配置选择浏览器引擎
pub fn from_settings(settings: &BrowserSettings) -> anyhow::Result<Arc<dyn BrowserEngine>> {
    match settings.engine.as_str() {
        "chromium" => Ok(Arc::new(chromium_engine::ChromiumEngine::new(settings))),
        "http" => Ok(Arc::new(http_engine::HttpEngine)),
        other => anyhow::bail!("Unknown browser engine: {}", other),
    }
}
