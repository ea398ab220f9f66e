// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 爬取核心：播放量解析、站点策略、爬取循环与浏览器会话

pub mod controller;
pub mod hashtag;
pub mod session;
pub mod strategy;
pub mod view_count;
pub mod wiki;
