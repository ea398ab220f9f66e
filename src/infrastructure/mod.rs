// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部系统的交互：
/// - 数据库（database）：连接池、迁移和实体映射
/// - 指标（metrics）：Prometheus 导出与爬取指标
/// - 仓库实现（repositories）：领域仓库接口的 SeaORM 实现
/// - YouTube 客户端（youtube_client）：视频元数据获取
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod youtube_client;
