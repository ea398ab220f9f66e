// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：抓取内容、爬取结果与视频元数据
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：爬取与视频元数据业务流程
///
/// 领域层不依赖于具体的存储或浏览器实现。
pub mod models;
pub mod repositories;
pub mod services;
