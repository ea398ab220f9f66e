// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取内容（scraped_content）：一次爬取中发现的单个条目及爬取结果
/// - 视频（video）：单个视频的元数据
pub mod scraped_content;
pub mod video;
