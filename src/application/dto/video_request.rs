// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static VIDEO_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,20}$").expect("video id pattern is valid"));

/// 视频元数据请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct VideoRequestDto {
    /// YouTube 视频 ID
    #[validate(regex(path = *VIDEO_ID_PATTERN))]
    pub video_id: String,
}
