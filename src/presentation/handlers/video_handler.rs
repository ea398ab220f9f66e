// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::video_request::VideoRequestDto,
    domain::{models::video::VideoMetadata, services::video_service::VideoService},
    presentation::errors::AppError,
};

/// 获取视频元数据，未缓存时从上游获取并保存
pub async fn create_video(
    Extension(service): Extension<Arc<VideoService>>,
    Json(payload): Json<VideoRequestDto>,
) -> Result<Json<VideoMetadata>, AppError> {
    payload.validate()?;
    let video = service.get_or_fetch(&payload.video_id).await?;
    Ok(Json(video))
}
