// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义数据持久化的抽象契约，具体实现由基础设施层提供：
/// - 视频仓库（video_repository）：缓存视频元数据
/// - 抓取内容仓库（scraped_content_repository）：保存爬取得到的内容条目
pub mod scraped_content_repository;
pub mod video_repository;

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
